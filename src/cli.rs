// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: A thin boundary; the engine only ever sees parsed values.

use clap::{Parser, Subcommand};
use firelift::config::SsrMode;

#[derive(Parser)]
#[command(name = "firelift")]
#[command(about = "Deploy SSR web builds to Firebase Hosting, Cloud Functions, or Cloud Run")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the workspace and deploy it
    Deploy {
        /// Hosting project id to deploy into
        #[arg(long)]
        project: String,

        /// Static build target, e.g. app:build
        #[arg(long)]
        browser_target: String,

        /// Server build target, e.g. app:server
        #[arg(long)]
        server_target: Option<String>,

        /// Prerender build target; runs exclusively when given
        #[arg(long)]
        prerender_target: Option<String>,

        /// How the server-rendered portion is hosted
        #[arg(long, value_enum, default_value_t = SsrMode::None)]
        ssr: SsrMode,

        /// Run the local emulator and confirm before deploying
        #[arg(long)]
        preview: bool,

        /// Override the managed-container service id
        #[arg(long)]
        service_id: Option<String>,

        /// Auth token; falls back to FIREBASE_TOKEN
        #[arg(long, env = "FIREBASE_TOKEN")]
        token: Option<String>,
    },
}
