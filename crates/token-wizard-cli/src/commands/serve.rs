use std::net::IpAddr;

use anyhow::Result;
use token_wizard_server::{Server, ServerConfig};

use crate::output;

/// Run the HTTP gateway until interrupted.
pub async fn run(host: IpAddr, port: u16) -> Result<()> {
    let config = ServerConfig { host, port };

    output::print_banner("serve", None);
    output::print_field("address", &format!("http://{}", config.address()));
    output::print_field("routes", "POST /ut-contract, POST /gt-contract, GET /, GET /secret-path");

    Server::new(config).run().await
}
