use ost_sdk::params::QueryParams;
use ost_sdk::{ClientConfig, OstClient};

fn live_tests_enabled() -> bool {
    std::env::var("OST_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_list_actions_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let config = match ClientConfig::try_from_env() {
        Some(config) => config,
        None => return Ok(()),
    };
    let client = OstClient::new(config)?;

    let params = QueryParams::new()
        .with("page_no", 1)
        .with("limit", 10)
        .with("order_by", "created")
        .with("order", "desc");
    let data = client.get("/actions", params).await?;
    assert!(data.get("actions").is_some());

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_rejects_invalid_amount() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let config = match ClientConfig::try_from_env() {
        Some(config) => config,
        None => return Ok(()),
    };
    let client = OstClient::new(config)?;

    let params = QueryParams::new().with("amount", -1);
    let err = client
        .post("/transactions", params)
        .await
        .expect_err("a negative amount must be rejected");
    assert!(err.is_bad_request());

    Ok(())
}
