use crate::errors::{LookupError, LookupResult, StateError, StateResult};
use crate::types::{JobName, ViewName};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

type Members = Vec<JobName>;

/// Named, ordered, duplicate-free collections of job references.
///
/// Every view guards its member list with its own mutex; the outer map
/// lock is only held long enough to resolve a view, so unrelated views
/// mutate concurrently. Once `add_jobs` returns, any reader of that view
/// observes the new membership.
#[derive(Default)]
pub struct ViewStore {
    views: RwLock<HashMap<ViewName, Arc<Mutex<Members>>>>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_view(&self, name: impl Into<ViewName>) -> StateResult<()> {
        let name = name.into();
        let mut views = self.views.write().unwrap();
        if views.contains_key(&name) {
            return Err(StateError::ViewExists(name));
        }
        tracing::debug!(view = %name, "view created");
        views.insert(name, Arc::new(Mutex::new(Members::new())));
        Ok(())
    }

    pub fn view_exists(&self, name: &str) -> bool {
        self.views.read().unwrap().contains_key(name)
    }

    /// Member jobs in insertion order.
    pub fn members(&self, name: &str) -> LookupResult<Vec<JobName>> {
        let view = self.view(name)?;
        let members = view.lock().unwrap();
        Ok(members.clone())
    }

    pub fn contains(&self, name: &str, job: &str) -> LookupResult<bool> {
        let view = self.view(name)?;
        let members = view.lock().unwrap();
        Ok(members.iter().any(|member| member == job))
    }

    /// Append each job not already a member, in input order, under one
    /// lock acquisition. Adding a present member is a no-op, so the call
    /// is idempotent per job. Job names must already be resolved; this
    /// store only knows view names.
    pub fn add_jobs(&self, name: &str, jobs: &[JobName]) -> LookupResult<()> {
        let view = self.view(name)?;
        let mut members = view.lock().unwrap();
        for job in jobs {
            if !members.contains(job) {
                members.push(job.clone());
            }
        }
        Ok(())
    }

    /// Drop each listed job from the view. Removing a job that is not a
    /// member is a no-op.
    pub fn remove_jobs(&self, name: &str, jobs: &[JobName]) -> LookupResult<()> {
        let view = self.view(name)?;
        let mut members = view.lock().unwrap();
        members.retain(|member| !jobs.contains(member));
        Ok(())
    }

    fn view(&self, name: &str) -> LookupResult<Arc<Mutex<Members>>> {
        self.views
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::NoSuchView(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let store = ViewStore::new();
        store.create_view("curView").unwrap();
        store.add_jobs("curView", &["newProject".into()]).unwrap();
        store.add_jobs("curView", &["newProject".into()]).unwrap();
        assert_eq!(store.members("curView").unwrap(), vec!["newProject"]);
    }

    #[test]
    fn membership_keeps_insertion_order() {
        let store = ViewStore::new();
        store.create_view("curView").unwrap();
        store
            .add_jobs("curView", &["b".into(), "a".into(), "c".into()])
            .unwrap();
        assert_eq!(store.members("curView").unwrap(), vec!["b", "a", "c"]);
        assert!(store.contains("curView", "a").unwrap());
        assert!(!store.contains("curView", "d").unwrap());
    }

    #[test]
    fn remove_drops_only_listed_members() {
        let store = ViewStore::new();
        store.create_view("curView").unwrap();
        store
            .add_jobs("curView", &["a".into(), "b".into(), "c".into()])
            .unwrap();
        store
            .remove_jobs("curView", &["b".into(), "ghost".into()])
            .unwrap();
        assert_eq!(store.members("curView").unwrap(), vec!["a", "c"]);
    }

    #[test]
    fn duplicate_view_rejected() {
        let store = ViewStore::new();
        store.create_view("curView").unwrap();
        assert_eq!(
            store.create_view("curView"),
            Err(StateError::ViewExists("curView".into()))
        );
    }

    #[test]
    fn unknown_view_echoes_the_name_verbatim() {
        let store = ViewStore::new();
        let err = store.members("xView").unwrap_err();
        assert_eq!(err.to_string(), "No such view 'xView'");
        let err = store.add_jobs("", &[]).unwrap_err();
        assert_eq!(err.to_string(), "No such view ''");
    }

    #[test]
    fn distinct_views_mutate_concurrently() {
        let store = Arc::new(ViewStore::new());
        store.create_view("viewA").unwrap();
        store.create_view("viewB").unwrap();

        let handles: Vec<_> = ["viewA", "viewB"]
            .into_iter()
            .map(|view| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        store
                            .add_jobs(view, &[format!("{}-job-{}", view, i)])
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.members("viewA").unwrap().len(), 100);
        assert_eq!(store.members("viewB").unwrap().len(), 100);
    }
}
