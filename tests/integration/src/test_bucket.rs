//! Bucket lifecycle integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::ByteStream;

    use crate::{cleanup_bucket, create_test_bucket, s3_client, test_bucket_name};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_create_and_list_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "create").await;

        let resp = client.list_buckets().send().await.expect("list_buckets");
        let names: Vec<_> = resp.buckets().iter().filter_map(|b| b.name()).collect();
        assert!(names.contains(&bucket.as_str()), "bucket should be listed");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_duplicate_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "dup").await;

        let result = client.create_bucket().bucket(&bucket).send().await;
        let err = result.expect_err("duplicate create should fail");
        let service_err = err.into_service_error();
        assert!(
            service_err.is_bucket_already_exists()
                || service_err.is_bucket_already_owned_by_you(),
            "unexpected error: {service_err}"
        );

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_delete_empty_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "delempty").await;

        client
            .delete_bucket()
            .bucket(&bucket)
            .send()
            .await
            .expect("delete_bucket");

        let resp = client.list_buckets().send().await.expect("list_buckets");
        let names: Vec<_> = resp.buckets().iter().filter_map(|b| b.name()).collect();
        assert!(
            !names.contains(&bucket.as_str()),
            "deleted bucket should not be listed"
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_recreate_bucket_after_delete() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "recreate").await;

        client
            .delete_bucket()
            .bucket(&bucket)
            .send()
            .await
            .expect("delete_bucket");

        // The name is available again.
        client
            .create_bucket()
            .bucket(&bucket)
            .send()
            .await
            .expect("recreate bucket");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_delete_of_nonempty_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "occupied").await;

        client
            .put_object()
            .bucket(&bucket)
            .key("keeper.txt")
            .body(ByteStream::from_static(b"still here"))
            .send()
            .await
            .expect("put_object");

        let result = client.delete_bucket().bucket(&bucket).send().await;
        assert!(result.is_err(), "delete of non-empty bucket should fail");

        // The bucket and its object survive the failed delete.
        client
            .head_object()
            .bucket(&bucket)
            .key("keeper.txt")
            .send()
            .await
            .expect("object should still exist");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_head_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "headb").await;

        client
            .head_bucket()
            .bucket(&bucket)
            .send()
            .await
            .expect("head_bucket");

        let missing = test_bucket_name("headmiss");
        let result = client.head_bucket().bucket(&missing).send().await;
        assert!(result.is_err(), "head of missing bucket should fail");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_get_bucket_location() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "loc").await;

        let resp = client
            .get_bucket_location()
            .bucket(&bucket)
            .send()
            .await
            .expect("get_bucket_location");

        // us-east-1 is reported as an empty location constraint.
        assert!(
            resp.location_constraint().is_none()
                || resp.location_constraint().map(aws_sdk_s3::types::BucketLocationConstraint::as_str)
                    == Some("us-east-1"),
            "unexpected location: {:?}",
            resp.location_constraint()
        );

        cleanup_bucket(&client, &bucket).await;
    }
}
