use std::process;
use std::time::Duration;

use adforge::{
    logger::{self, LogLevel, LoggerConfig},
    AdClient, AdContent, AdError, AdSession, ClientConfig, SelectedImage, SubmissionState,
    Template,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "adforge", version, about = "Generate an advertisement from a product image")]
struct Cli {
    /// Image file (jpeg, jpg, png, gif, webp) or a `data:image/...;base64,` URI
    image: Option<String>,

    /// simple_ad, discount_ad or feature_highlight
    #[arg(short, long, default_value = "simple_ad")]
    template: Template,

    /// Overrides ADFORGE_BACKEND_URL
    #[arg(short = 'u', long)]
    backend_url: Option<String>,

    /// Request timeout in seconds, overrides ADFORGE_TIMEOUT_SECS
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the available templates and exit
    #[arg(long)]
    list_templates: bool,

    /// Emit log records as JSON lines, same as ADFORGE_LOG_JSON=true
    #[arg(long)]
    log_json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.backend_url {
        config = config.with_backend_url(url.as_str());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    if cli.log_json {
        config.log_json = true;
    }
    if cli.verbose {
        config = config.with_log_level(LogLevel::Debug);
    }
    if let Err(e) = logger::init_with_config(LoggerConfig::from_client_config(&config)) {
        eprintln!("{}", e);
    }
    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }

    if cli.list_templates {
        print_templates();
        return;
    }

    let Some(image_arg) = cli.image.as_deref() else {
        report(&AdError::MissingImage);
        process::exit(1);
    };

    if let Err(err) = run(config, image_arg, cli.template).await {
        report(&err);
        process::exit(1);
    }
}

async fn run(config: ClientConfig, image_arg: &str, template: Template) -> adforge::Result<()> {
    logger::log_config_info(&config);

    let image = if image_arg.trim_start().starts_with("data:") {
        SelectedImage::from_data_uri(image_arg)?
    } else {
        SelectedImage::from_path(image_arg)?
    };

    let client = AdClient::new(&config)?;
    let mut session = AdSession::with_template(template);
    session.select_image(image);

    session.submit(&client).await?;

    match session.into_state() {
        SubmissionState::Succeeded(ad) => {
            match &ad.content {
                AdContent::Url(url) => log::info!("🖼️  Ad available at {}", url),
                AdContent::Text(_) => log::info!("📝 Analysis complete"),
                AdContent::Raw(_) => log::warn!("Backend reply had no known result field"),
            }
            println!("{}", ad.content);
            Ok(())
        }
        SubmissionState::Failed(err) => Err(err),
        SubmissionState::Idle | SubmissionState::Submitting => Ok(()),
    }
}

fn report(err: &AdError) {
    eprintln!("{}\n\n{}", err.title(), err.user_message());
}

fn print_templates() {
    for template in Template::ALL {
        println!(
            "{:<18} {:<17} {}",
            template.id(),
            template.display_name(),
            template.fields().join(", ")
        );
        println!("{:<18} {}", "", template.description());
    }
}
