use clap::{Parser, Subcommand};
use skilltree::Config;
use skilltree::error::AppResult;
use skilltree::generation::{GenerationRequest, Level, Orchestrator, Pace, ResourcePreference, Temperatures};
use skilltree::llm::ChatClient;
use skilltree::model::entity::{AnswerRecord, LearningModule, LearningPath};
use skilltree::model::{CrudRepository, DbConnection, ModelManager, PaginatableRepository};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for generating and inspecting learning paths", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a path with the configured model and store it
    Generate {
        /// Learning goal
        #[arg(long)]
        target: String,
        #[arg(long, default_value = "novice")]
        level: Level,
        #[arg(long, default_value = "relaxed")]
        pace: Pace,
        #[arg(long, default_value = "mixed")]
        resource_type: ResourcePreference,
    },

    /// List stored paths, newest first
    Paths {
        #[arg(long, default_value_t = 20)]
        limit: i64,
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },

    /// Print the modules of a path in tree order
    Show { path_id: Uuid },

    /// Answer accuracy of a path or one of its modules
    Accuracy {
        path_id: Uuid,
        #[arg(long)]
        module_name: Option<String>,
    },

    /// Delete a path with everything generated for it
    Delete { path_id: Uuid },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let config = Config::get_or_init(false).await;
    let db_con = DbConnection::connect(config.app().database_uri())?;
    db_con.migrate().await?;
    let mm = ModelManager::new(db_con);

    match args.command {
        Commands::Generate {
            target,
            level,
            pace,
            resource_type,
        } => {
            let client = ChatClient::from_config(config.llm())?;
            let request = GenerationRequest {
                target,
                level,
                pace,
                resource_type,
            };

            let generated = Orchestrator::new(&client, &mm, Temperatures::from_config(config.llm()))
                .generate(&request)
                .await?;

            println!("Path created: {}", generated.path.id());
            for entry in &generated.modules {
                println!(
                    "  [{}] {} ({}h): {} resources, {} exercises",
                    entry.module.tier(),
                    entry.module.name(),
                    entry.module.duration_hours(),
                    entry.resource_count,
                    entry.exercise_count
                );
            }
        }

        Commands::Paths { limit, offset } => {
            let page = LearningPath::page(&mm, limit, offset).await?;
            println!("{} paths stored", page.total);
            for path in page.items {
                println!(
                    "{}  {}  {} / {} / {}  {}",
                    path.id(),
                    path.create_time().format("%Y-%m-%d %H:%M"),
                    path.level(),
                    path.pace(),
                    path.resource_type(),
                    path.target()
                );
            }
        }

        Commands::Show { path_id } => {
            let Some(path) = LearningPath::find_by_id(&mm, path_id).await? else {
                println!("Path {} not found", path_id);
                return Ok(());
            };

            println!("{}\n", path.target());
            for module in LearningModule::list_for_path(&mm, path_id).await? {
                println!(
                    "{:>2}. [{}] {} ({}h), depends on: {}",
                    module.position() + 1,
                    module.tier(),
                    module.name(),
                    module.duration_hours(),
                    module.dependencies()
                );
            }
        }

        Commands::Accuracy {
            path_id,
            module_name,
        } => {
            let stats = AnswerRecord::stats(&mm, path_id, module_name.as_deref()).await?;
            println!(
                "{} of {} correct ({:.2}%)",
                stats.correct, stats.total, stats.accuracy
            );
        }

        Commands::Delete { path_id } => match LearningPath::find_by_id(&mm, path_id).await? {
            Some(path) => {
                path.delete(&mm).await?;
                println!("Path {} deleted", path_id);
            }
            None => println!("Path {} not found", path_id),
        },
    }

    Ok(())
}
