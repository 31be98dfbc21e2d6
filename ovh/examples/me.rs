use ovhapi::Client;

#[tokio::main]
async fn main() -> ovhapi::Result<()> {
    env_logger::init();

    // Endpoint and credentials come from OVH_* env values or ovh.conf files.
    let client = Client::new_default().await?;
    println!(
        "connected to {}, local clock is {}s ahead",
        client.endpoint(),
        client.time_delta()
    );

    let resp = client.get("/me").await?;
    resp.decode_error(&[200])?;
    println!("{}", resp.text());

    Ok(())
}
