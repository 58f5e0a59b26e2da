use chat_widget::config::WidgetConfig;
use chat_widget::terminal::{TerminalView, spawn_line_events};
use chat_widget::transport::HttpTransport;
use chat_widget::widget::ChatWidget;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = WidgetConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    info!(endpoint = %config.endpoint, "starting chat widget");

    let transport = HttpTransport::new(config.endpoint.clone());
    let view = TerminalView::new(std::io::stdout());
    let widget = ChatWidget::mount(config.ids.clone(), transport, view);

    let events = spawn_line_events(BufReader::new(tokio::io::stdin()), &config.ids);
    let mut widget = widget.run(events).await;

    // stdin closed; let outstanding replies print before exiting
    widget.settle().await;
    Ok(())
}
