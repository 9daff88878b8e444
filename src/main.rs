use gh_collaborators::commands::{
    run_add, run_list, run_remove, AssignOptions, ClientOptions, ListOptions, Summary,
};
use gh_collaborators::Result;
use log::{error, info};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "gh-collaborators",
    about = "List and maintain repository collaborators and their repos."
)]
enum Command {
    #[structopt(name = "add")]
    /// Add repository collaborators from a CSV file
    Add(AssignOptions),

    #[structopt(name = "remove")]
    /// Remove repository collaborators listed in a CSV file
    Remove(AssignOptions),

    #[structopt(name = "list")]
    /// Generate a report of outside collaborators and their repository access
    List(ListOptions),
}

impl Command {
    fn client(&self) -> &ClientOptions {
        match self {
            Command::Add(options) | Command::Remove(options) => &options.client,
            Command::List(options) => &options.client,
        }
    }

    fn organization(&self) -> &str {
        match self {
            Command::Add(options) | Command::Remove(options) => &options.organization,
            Command::List(options) => &options.organization,
        }
    }

    async fn run(&self) -> Result<Summary> {
        match self {
            Command::Add(options) => run_add(options).await,
            Command::Remove(options) => run_remove(options).await,
            Command::List(options) => run_list(options).await,
        }
    }

    fn success_message(&self) -> String {
        let org = self.organization();
        match self {
            Command::Add(_) => format!(
                "Successfully created repository assignments for repository collaborators in: {}.",
                org
            ),
            Command::Remove(_) => format!(
                "Successfully removed repository assignments for repository collaborators in: {}.",
                org
            ),
            Command::List(_) => format!(
                "Successfully listed repository collaborator permissions for repositories in {}",
                org
            ),
        }
    }
}

#[tokio::main]
async fn main() {
    let command = Command::from_args();

    let filter = if command.client().debug {
        "gh_collaborators=debug,github=debug,info"
    } else {
        "info"
    };
    env_logger::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match command.run().await {
        Ok(summary) if summary.is_success() => {
            info!(
                "processed {} item(s), wrote {} report row(s)",
                summary.attempted, summary.written
            );
            println!("{}", command.success_message());
        }
        Ok(summary) => {
            error!(
                "{} of {} item(s) in {} failed",
                summary.failed,
                summary.attempted,
                command.organization()
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!("{}", e);
            if e.is_transport() {
                error!("check the hostname and that the token has the required scopes");
            } else if e.is_decode() {
                error!("unexpected response from {}", command.organization());
            }
            std::process::exit(1);
        }
    }
}
