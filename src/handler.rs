use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lambda_runtime::{Context, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use crate::resources::listing::{BucketLister, ListPages};

/// Lists the bucket and hands the triggering event back untouched.
///
/// The listing is only logged; it never influences the returned value. When
/// the invocation carries a deadline the listing is cut off once it passes.
pub async fn function_handler<P: ListPages>(
    event: LambdaEvent<Value>,
    lister: &BucketLister<P>,
) -> Result<Value, Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, event = %payload, "received event");

    let keys = match remaining_time(&context) {
        Some(budget) => lister.list_all_keys_within(budget).await?,
        None => lister.list_all_keys().await?,
    };
    info!(
        bucket = lister.bucket(),
        count = keys.len(),
        ?keys,
        "bucket contents"
    );

    Ok(payload)
}

/// Time left until the invocation deadline. A zero deadline means none was
/// set.
fn remaining_time(context: &Context) -> Option<Duration> {
    if context.deadline == 0 {
        return None;
    }
    let deadline = UNIX_EPOCH + Duration::from_millis(context.deadline);
    Some(
        deadline
            .duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO),
    )
}
