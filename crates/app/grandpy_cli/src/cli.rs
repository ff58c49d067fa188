use clap::{Parser, Subcommand};
use grandpy_client::DEFAULT_ENDPOINT;

/// Ask GrandPy where things are.
#[derive(Parser, Debug)]
#[command(name = "grandpy", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a question to a running GrandPy server and print the answer.
    Ask {
        /// The question, e.g. "Où se trouve la tour Eiffel ?"
        question: String,

        /// Base URL of the GrandPy server.
        #[arg(long, env = "GRANDPY_SERVER_URL", default_value = "http://127.0.0.1:5000/")]
        server: String,

        /// Path of the question endpoint.
        #[arg(long, env = "GRANDPY_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },

    /// Print the version.
    Version,
}
