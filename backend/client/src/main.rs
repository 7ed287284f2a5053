use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use contact_client::{ClientOptions, ContactClient, ContactForm, Notice};
use honeypot::{ClientGate, GateConfig, HONEYPOT_FIELD, now_millis};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    endpoint: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    message: String,

    /// Value typed into the `website` decoy, like a form-filling bot would.
    #[arg(long, default_value = "")]
    decoy: String,

    /// Pretend the dialog opened this long before submitting.
    #[arg(long, default_value_t = 0)]
    rendered_ms_ago: i64,

    #[arg(long, default_value_t = 3000)]
    min_submit_ms: u64,

    #[arg(long)]
    no_time_validation: bool,

    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    #[arg(long, default_value_t = 1000)]
    fake_latency_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let config = GateConfig {
        min_submit_time: Duration::from_millis(args.min_submit_ms),
        enable_time_validation: !args.no_time_validation,
    };
    let gate = ClientGate::with_rendered_at(config, rendered_at(now_millis(), args.rendered_ms_ago));

    let client = ContactClient::new(ClientOptions {
        timeout: Duration::from_millis(args.timeout_ms),
        fake_latency: Duration::from_millis(args.fake_latency_ms),
        ..ClientOptions::new(&args.endpoint)
    })?;

    let form = ContactForm {
        name: args.name,
        email: args.email,
        message: args.message,
    };
    let decoys = [("website", args.decoy.as_str()), (HONEYPOT_FIELD, "")];

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.set_message("Sending...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = client.submit(&gate, &form, &decoys).await;
    pb.finish_and_clear();

    match result {
        Ok(notice) => {
            print_notice(&notice);
            Ok(())
        }
        Err(e) => {
            print_notice(&Notice::failed(&e));
            bail!(e)
        }
    }
}

fn rendered_at(now: i64, rendered_ms_ago: i64) -> i64 {
    now.saturating_sub(rendered_ms_ago)
}

fn print_notice(notice: &Notice) {
    println!("{}", notice.title);
    println!("{}", notice.description);
}
