//! Object-storage request and result declarations for `oss-codec`, with
//! one entry point per operation.

pub mod bucket;
pub mod delete;
pub mod object;
pub mod operations;

pub use bucket::{
    BucketRequest, CommonPrefix, EmptyResult, GetBucketPolicyRequest, GetBucketPolicyResult,
    ListObjectsV2Request, ListObjectsV2Result, ObjectProperties, Owner, PutBucketPolicyRequest,
    PutBucketPolicyResult,
};
pub use delete::{
    Delete, DeleteMultipleObjectsRequest, DeleteMultipleObjectsResult, DeleteObject, DeletedInfo,
    ObjectIdentifier, resolve_delete_encoding,
};
pub use object::{
    GetObjectRequest, GetObjectResult, HeadObjectRequest, HeadObjectResult, METADATA_PREFIX,
    ObjectResult, PutObjectRequest, PutObjectResult,
};
