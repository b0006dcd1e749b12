//! Per-operation entry points. Each `*_input` function fixes the operation
//! name, method and sub-resource parameters, then runs the serializer with
//! the operation's hooks. The unprefixed functions send the request through
//! a [`Transport`] and decode the typed result.

use http::Method;
use oss_codec::{
    CodecResult, InvokeError, OperationInput, SerdeHook, Transport, add_content_sha256, invoke,
    serialize_input,
};

use crate::bucket::{
    GetBucketPolicyRequest, GetBucketPolicyResult, ListObjectsV2Request, ListObjectsV2Result,
    PutBucketPolicyRequest, PutBucketPolicyResult,
};
use crate::delete::{
    DeleteMultipleObjectsRequest, DeleteMultipleObjectsResult, resolve_delete_encoding,
};
use crate::object::{
    GetObjectRequest, GetObjectResult, HeadObjectRequest, HeadObjectResult, PutObjectRequest,
    PutObjectResult,
};

const DELETE_MULTIPLE_OBJECTS_HOOKS: [SerdeHook<DeleteMultipleObjectsRequest>; 2] =
    [resolve_delete_encoding, add_content_sha256];

fn put_object_partial() -> OperationInput {
    OperationInput::new("PutObject", Method::PUT)
}

fn head_object_partial() -> OperationInput {
    OperationInput::new("HeadObject", Method::HEAD)
}

fn get_object_partial() -> OperationInput {
    OperationInput::new("GetObject", Method::GET)
}

fn delete_multiple_objects_partial() -> OperationInput {
    OperationInput::new("DeleteMultipleObjects", Method::POST).with_parameter("delete", "")
}

fn list_objects_v2_partial() -> OperationInput {
    OperationInput::new("ListObjectsV2", Method::GET).with_parameter("list-type", "2")
}

fn put_bucket_policy_partial() -> OperationInput {
    OperationInput::new("PutBucketPolicy", Method::PUT).with_parameter("policy", "")
}

fn get_bucket_policy_partial() -> OperationInput {
    OperationInput::new("GetBucketPolicy", Method::GET).with_parameter("policy", "")
}

pub fn put_object_input(request: &PutObjectRequest) -> CodecResult<OperationInput> {
    serialize_input(request, put_object_partial(), &[])
}

pub fn head_object_input(request: &HeadObjectRequest) -> CodecResult<OperationInput> {
    serialize_input(request, head_object_partial(), &[])
}

pub fn get_object_input(request: &GetObjectRequest) -> CodecResult<OperationInput> {
    serialize_input(request, get_object_partial(), &[])
}

/// Fails with `AmbiguousEncoding` unless exactly one of the legacy object
/// list or the composite `delete` container is set.
pub fn delete_multiple_objects_input(
    request: &DeleteMultipleObjectsRequest,
) -> CodecResult<OperationInput> {
    serialize_input(
        request,
        delete_multiple_objects_partial(),
        &DELETE_MULTIPLE_OBJECTS_HOOKS,
    )
}

pub fn list_objects_v2_input(request: &ListObjectsV2Request) -> CodecResult<OperationInput> {
    serialize_input(request, list_objects_v2_partial(), &[])
}

pub fn put_bucket_policy_input(request: &PutBucketPolicyRequest) -> CodecResult<OperationInput> {
    serialize_input(request, put_bucket_policy_partial(), &[])
}

pub fn get_bucket_policy_input(request: &GetBucketPolicyRequest) -> CodecResult<OperationInput> {
    serialize_input(request, get_bucket_policy_partial(), &[])
}

pub fn put_object<T: Transport>(
    transport: &T,
    request: &PutObjectRequest,
) -> Result<PutObjectResult, InvokeError<T::Error>> {
    invoke(transport, request, put_object_partial(), &[])
}

pub fn head_object<T: Transport>(
    transport: &T,
    request: &HeadObjectRequest,
) -> Result<HeadObjectResult, InvokeError<T::Error>> {
    invoke(transport, request, head_object_partial(), &[])
}

pub fn get_object<T: Transport>(
    transport: &T,
    request: &GetObjectRequest,
) -> Result<GetObjectResult, InvokeError<T::Error>> {
    invoke(transport, request, get_object_partial(), &[])
}

pub fn delete_multiple_objects<T: Transport>(
    transport: &T,
    request: &DeleteMultipleObjectsRequest,
) -> Result<DeleteMultipleObjectsResult, InvokeError<T::Error>> {
    invoke(
        transport,
        request,
        delete_multiple_objects_partial(),
        &DELETE_MULTIPLE_OBJECTS_HOOKS,
    )
}

pub fn list_objects_v2<T: Transport>(
    transport: &T,
    request: &ListObjectsV2Request,
) -> Result<ListObjectsV2Result, InvokeError<T::Error>> {
    invoke(transport, request, list_objects_v2_partial(), &[])
}

pub fn put_bucket_policy<T: Transport>(
    transport: &T,
    request: &PutBucketPolicyRequest,
) -> Result<PutBucketPolicyResult, InvokeError<T::Error>> {
    invoke(transport, request, put_bucket_policy_partial(), &[])
}

pub fn get_bucket_policy<T: Transport>(
    transport: &T,
    request: &GetBucketPolicyRequest,
) -> Result<GetBucketPolicyResult, InvokeError<T::Error>> {
    invoke(transport, request, get_bucket_policy_partial(), &[])
}
