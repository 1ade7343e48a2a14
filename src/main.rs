use std::sync::Arc;

use lambda_http::{run, service_fn, Error};

use bedrock_gateway::config::GatewayConfig;
use bedrock_gateway::handler::handle_event;
use bedrock_gateway::providers::bedrock::BedrockClient;

#[tokio::main]
async fn main() -> Result<(), Error>
{   env_logger::init();

    // One shared client per execution environment,
    // reused across invocations
    let config = GatewayConfig::from_env();
    let client = Arc::new(BedrockClient::new(config));

    run(service_fn(move |event| {
      let client = client.clone();
      async move {
        Ok::<_, Error>(handle_event(&client, event).await)
      }
    }))
    .await
}
