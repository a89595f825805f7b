use std::process;
use std::sync::Arc;

use lexware_office_mcp::config::Config;
use lexware_office_mcp::lexoffice::LexofficeClient;
use lexware_office_mcp::logger::FileLogger;
use lexware_office_mcp::mcp::server::StdioServer;
use lexware_office_mcp::mcp::service::McpService;
use lexware_office_mcp::mcp::tools::ToolRegistry;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok(); // Load .env file

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    };

    // stdout carries protocol frames, so log records go to a file. Install
    // the logger before anything that might want to report a problem.
    if let Err(err) = FileLogger::init(&config.log_file) {
        eprintln!(
            "Error: failed to open log file {}: {}",
            config.log_file.display(),
            err
        );
        process::exit(1);
    }

    let client = Arc::new(LexofficeClient::new(&config));
    let registry = ToolRegistry::new(client);
    let server = StdioServer::new(McpService::new(registry));

    if let Err(err) = server.run().await {
        log::error!("Fatal error while serving: {}", err);
        process::exit(1);
    }
}
