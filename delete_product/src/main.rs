use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use products::telemetry::init_tracing;
use products::{Config, DynamoStore, Operation};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env();
    init_tracing(&config);

    // One client per process, shared by every invocation.
    let store = DynamoStore::from_config(&config).await;
    info!("delete_product using table {}", store.table_name());

    run(service_fn(|event: LambdaEvent<Value>| {
        Operation::Delete.function_handler(&store, event)
    }))
    .await
}
