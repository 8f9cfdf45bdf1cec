use uuid::Uuid;

pub type JobName = String;
pub type ViewName = String;
pub type BuildNumber = u32;
pub type QueueId = Uuid;
pub type LogBlob = bytes::Bytes;
