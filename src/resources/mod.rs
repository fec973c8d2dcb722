pub mod bucket;
pub mod listing;
pub mod object;
pub mod s3;
