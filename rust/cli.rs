use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-summarizer",
    version,
    about = "HTTP service that summarizes uploaded PDFs and renders summaries back to PDF"
)]
pub struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, default_value = "0.0.0.0", help = "Address to bind the HTTP listener to")]
    pub host: String,

    #[arg(long, default_value_t = 8000, help = "Port to bind the HTTP listener to")]
    pub port: u16,
}
