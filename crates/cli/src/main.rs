//! Sprintdeck CLI - team, task and sprint tracking from the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sprintdeck_client::{
    ApiClient, ClientConfig, FileTokenStore, LoginRedirect, MemoryTokenStore, TokenStore,
    ENV_TOKEN_FILE,
};
use sprintdeck_core::{
    NewSprint, NewTask, NewTeamMember, Priority, Severity, Skill, SprintId, Task, TaskId,
    TeamMemberId,
};
use sprintdeck_sync::{Notifier, ResourceState, SprintStore, TaskStore, TeamMemberStore};
use std::sync::Arc;
use tracing::{warn, Level};

#[derive(Parser)]
#[command(name = "sprintdeck")]
#[command(about = "Team, task and sprint tracking client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage team members
    Members {
        #[command(subcommand)]
        command: MemberCommands,
    },
    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage sprints
    Sprints {
        #[command(subcommand)]
        command: SprintCommands,
    },
    /// Probe backend health
    Health,
    /// Store the credential token
    Login {
        /// Token issued by the backend
        token: String,
    },
    /// Discard the credential token
    Logout,
}

#[derive(Subcommand)]
enum MemberCommands {
    /// List team members
    List,
    /// Add a team member
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Contact email
        #[arg(long)]
        email: String,
        /// Hours available in the sprint
        #[arg(long, default_value = "40")]
        hours: f64,
        /// Skill as name:proficiency (repeatable)
        #[arg(long = "skill")]
        skills: Vec<String>,
    },
    /// Remove a team member
    Rm {
        /// Member ID
        id: String,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// List tasks
    List,
    /// Add a task
    Add {
        /// Task title
        #[arg(long)]
        title: String,
        /// Detailed description
        #[arg(long, default_value = "")]
        description: String,
        /// low, medium, high or critical
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// 0.0 (simple) to 1.0 (complex)
        #[arg(long, default_value = "0.5")]
        complexity: f64,
        /// Estimated effort in hours
        #[arg(long, default_value = "8")]
        hours: f64,
        /// Deadline, RFC 3339
        #[arg(long)]
        deadline: chrono::DateTime<chrono::Utc>,
        /// Required skill name (repeatable)
        #[arg(long = "skill")]
        skills: Vec<String>,
    },
    /// Remove a task
    Rm {
        /// Task ID
        id: String,
    },
}

#[derive(Subcommand)]
enum SprintCommands {
    /// List sprints
    List,
    /// Add a sprint
    Add {
        /// Sprint name
        #[arg(long)]
        name: String,
        /// Length in days
        #[arg(long, default_value = "14")]
        days: u32,
        /// Member ID to allocate (repeatable)
        #[arg(long = "member")]
        members: Vec<String>,
    },
    /// Ask the server to plan a sprint from the unassigned tasks
    Plan {
        /// Sprint ID
        id: String,
    },
    /// Remove a sprint
    Rm {
        /// Sprint ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env();
    let tokens = token_store_from_env();
    let api = ApiClient::new(&config, tokens.clone(), Arc::new(LoginRedirect::default()))?;
    let notifier = Notifier::new();

    match cli.command {
        Commands::Login { token } => {
            tokens.set(&token);
            println!("Credential stored");
        }
        Commands::Logout => {
            tokens.clear();
            println!("Credential cleared");
        }
        Commands::Health => {
            let health = api.health().check().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Commands::Members { command } => run_members(command, &api, &notifier).await?,
        Commands::Tasks { command } => run_tasks(command, &api, &notifier).await?,
        Commands::Sprints { command } => run_sprints(command, &api, &notifier).await?,
    }

    Ok(())
}

/// Use the file-backed store when a token file is configured; otherwise
/// the credential lives only for this invocation.
fn token_store_from_env() -> Arc<dyn TokenStore> {
    match std::env::var(ENV_TOKEN_FILE) {
        Ok(path) if !path.is_empty() => Arc::new(FileTokenStore::new(path)),
        _ => {
            warn!("{} not set, credential will not outlive this run", ENV_TOKEN_FILE);
            Arc::new(MemoryTokenStore::new())
        }
    }
}

async fn run_members(command: MemberCommands, api: &ApiClient, notifier: &Notifier) -> Result<()> {
    let store = TeamMemberStore::from_client(api);

    match command {
        MemberCommands::List => {
            store.load().await;
            report_fetch_error(&store.state());
            let members = store.members();
            println!("Team members ({})", members.len());
            for member in members {
                println!(
                    "  {} | {} | {} | {:.0}h free",
                    member.id,
                    member.name,
                    member.email,
                    member.available_hours(),
                );
            }
        }
        MemberCommands::Add {
            name,
            email,
            hours,
            skills,
        } => {
            let draft = NewTeamMember {
                name,
                email,
                skills: parse_skills(&skills)?,
                total_hours_available: hours,
            };
            match store.create(draft).await {
                Ok(member) => notifier.show(
                    format!("Added team member {}", member.name),
                    Severity::Success,
                ),
                Err(err) => notifier.show(err.message().to_string(), Severity::Error),
            }
            print_notification(notifier);
        }
        MemberCommands::Rm { id } => {
            match store.delete(&TeamMemberId::new(id)).await {
                Ok(()) => notifier.show("Team member removed", Severity::Success),
                Err(err) => notifier.show(err.message().to_string(), Severity::Error),
            }
            print_notification(notifier);
        }
    }

    Ok(())
}

async fn run_tasks(command: TaskCommands, api: &ApiClient, notifier: &Notifier) -> Result<()> {
    let store = TaskStore::from_client(api);

    match command {
        TaskCommands::List => {
            store.load().await;
            report_fetch_error(&store.state());
            let tasks = store.tasks();
            println!("Tasks ({})", tasks.len());
            for task in tasks {
                println!(
                    "  {} | {} | {:?} | {} - {}",
                    task.id,
                    task.priority,
                    task.status,
                    task.deadline.format("%Y-%m-%d"),
                    task.title,
                );
            }
        }
        TaskCommands::Add {
            title,
            description,
            priority,
            complexity,
            hours,
            deadline,
            skills,
        } => {
            let draft = NewTask {
                title,
                description,
                required_skills: skills,
                complexity,
                estimated_hours: hours,
                priority,
                deadline,
            };
            match store.create(draft).await {
                Ok(task) => {
                    notifier.show(format!("Added task {}", task.id), Severity::Success)
                }
                Err(err) => notifier.show(err.message().to_string(), Severity::Error),
            }
            print_notification(notifier);
        }
        TaskCommands::Rm { id } => {
            match store.delete(&TaskId::new(id)).await {
                Ok(()) => notifier.show("Task removed", Severity::Success),
                Err(err) => notifier.show(err.message().to_string(), Severity::Error),
            }
            print_notification(notifier);
        }
    }

    Ok(())
}

async fn run_sprints(command: SprintCommands, api: &ApiClient, notifier: &Notifier) -> Result<()> {
    let store = SprintStore::from_client(api);

    match command {
        SprintCommands::List => {
            store.load().await;
            report_fetch_error(&store.state());
            let sprints = store.sprints();
            println!("Sprints ({})", sprints.len());
            for sprint in sprints {
                println!(
                    "  {} | {} | {} | risk {} | {:.0}% done",
                    sprint.id,
                    sprint.status,
                    sprint.name,
                    sprint.risk_level,
                    sprint.progress() * 100.0,
                );
            }
        }
        SprintCommands::Add {
            name,
            days,
            members,
        } => {
            let draft = NewSprint {
                name,
                duration_days: days,
                team_member_ids: members.into_iter().map(TeamMemberId::new).collect(),
            };
            match store.create(draft).await {
                Ok(sprint) => {
                    notifier.show(format!("Added sprint {}", sprint.name), Severity::Success)
                }
                Err(err) => notifier.show(err.message().to_string(), Severity::Error),
            }
            print_notification(notifier);
        }
        SprintCommands::Plan { id } => {
            let tasks = TaskStore::from_client(api);
            tasks.load().await;
            report_fetch_error(&tasks.state());
            let candidates: Vec<Task> = tasks
                .tasks()
                .into_iter()
                .filter(|task| !task.is_assigned())
                .collect();

            match store.plan(&SprintId::new(id), &candidates).await {
                Ok(outcome) => {
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                    notifier.show("Sprint planned", Severity::Success);
                }
                Err(err) => notifier.show(err.message().to_string(), Severity::Error),
            }
            print_notification(notifier);
        }
        SprintCommands::Rm { id } => {
            match store.delete(&SprintId::new(id)).await {
                Ok(()) => notifier.show("Sprint removed", Severity::Success),
                Err(err) => notifier.show(err.message().to_string(), Severity::Error),
            }
            print_notification(notifier);
        }
    }

    Ok(())
}

/// Fetch failures are captured in the collection state rather than
/// raised; surface them before printing whatever snapshot survives.
fn report_fetch_error<T>(state: &ResourceState<T>) {
    if let Some(error) = &state.error {
        eprintln!("error: {}", error);
    }
}

fn print_notification(notifier: &Notifier) {
    if let Some(notification) = notifier.current() {
        println!("[{}] {}", notification.severity, notification.message);
    }
}

/// Parse repeatable `name:proficiency` skill arguments; a bare name
/// defaults to 0.5 proficiency.
fn parse_skills(raw: &[String]) -> Result<Vec<Skill>> {
    raw.iter()
        .map(|entry| {
            let (name, proficiency) = entry.split_once(':').unwrap_or((entry.as_str(), "0.5"));
            let proficiency: f64 = proficiency
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid proficiency in {:?}", entry))?;
            Ok(Skill {
                name: name.to_string(),
                proficiency,
            })
        })
        .collect()
}
