pub mod attr_merge;
pub mod logger;
