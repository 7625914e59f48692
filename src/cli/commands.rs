use clap::{Parser, Subcommand};

/// `campus` - IUB campus portal in the terminal, with a generative assistant.
#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(version = "0.1.0")]
#[command(about = "Browse the IUB campus portal and talk to its assistant.", long_about = None)]
pub struct Cli {
    /// Log at DEBUG instead of INFO
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read this config file instead of ~/.campus-portal/config.toml
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Talk to the campus assistant
    Chat {
        /// Single message mode (don't enter interactive mode)
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List departments, optionally filtered by name or faculty
    Departments {
        /// Case-insensitive search text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Show one department's detail page
    Department {
        /// Department id
        id: String,
    },

    /// Show a faculty member's profile
    Faculty {
        /// Department id
        department_id: String,

        /// Full name as listed on the department page
        name: String,

        /// Ask the faculty research assistant a question
        #[arg(long)]
        ask: Option<String>,
    },

    /// Generate the header image for a department
    Image {
        /// Department id
        department_id: String,
    },

    /// Replay navigation steps (`#/view` fragments or `view[:id]` targets)
    Navigate {
        #[arg(required = true)]
        steps: Vec<String>,
    },

    /// Show campus news
    News,

    /// Show the campus stat tiles
    Stats,
}
