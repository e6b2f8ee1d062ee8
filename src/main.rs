use clap::{Parser, Subcommand};
use std::io::Write as _;
use team_tools::core::export;
use team_tools::utils::{logger, validation};
use team_tools::{
    AppConfig, DrawEngine, DrawSettings, GeminiNamer, Grouping, LocalStorage, Roster, TeamError,
};

#[derive(Parser)]
#[command(name = "team-tools")]
#[command(about = "Roster curation, lucky draws and random team grouping")]
struct Args {
    /// Path to TOML configuration file (naming service settings)
    #[arg(short, long, default_value = "team-tools.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 名單管理：載入名單、檢查並移除重複姓名
    Roster {
        /// Plain-text or CSV file; names split on newline/comma/semicolon
        #[arg(long)]
        input: Option<String>,

        /// Use the built-in demo roster instead of a file
        #[arg(long)]
        demo: bool,

        /// Keep only the first entry per duplicated name
        #[arg(long)]
        dedupe: bool,
    },

    /// 幸運抽獎：從名單隨機抽出得獎者
    Draw {
        #[arg(long)]
        input: Option<String>,

        #[arg(long)]
        demo: bool,

        /// Winners per batch (clamped to at least 1)
        #[arg(long, default_value = "1")]
        winners: usize,

        /// Keep past winners eligible for later batches
        #[arg(long)]
        allow_duplicates: bool,

        /// Number of consecutive draw batches
        #[arg(long, default_value = "1")]
        rounds: usize,

        /// Skip the rolling animation
        #[arg(long)]
        no_roll: bool,
    },

    /// 自動分組：隨機洗牌後切成固定大小的組
    Group {
        #[arg(long)]
        input: Option<String>,

        #[arg(long)]
        demo: bool,

        /// Members per group (clamped to at least 2)
        #[arg(long, default_value = "4")]
        size: usize,

        /// Replace default names via the naming service (best-effort)
        #[arg(long)]
        ai_names: bool,

        /// Export the result as CSV into this directory
        #[arg(long)]
        export: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    match args.command {
        Command::Roster {
            input,
            demo,
            dedupe,
        } => {
            let mut roster = load_roster(input.as_deref(), demo).await?;
            report_roster(&roster);

            if dedupe {
                let dropped = roster.remove_duplicates();
                println!("✅ 已移除 {} 筆重複，剩餘 {} 人", dropped, roster.len());
            }
        }

        Command::Draw {
            input,
            demo,
            winners,
            allow_duplicates,
            rounds,
            no_roll,
        } => {
            let roster = load_roster(input.as_deref(), demo).await?;
            let settings = DrawSettings::clamped(allow_duplicates, winners);
            let mut engine = DrawEngine::new(settings);

            for round in 1..=rounds.max(1) {
                let result = if no_roll {
                    engine.draw_now(roster.participants())
                } else {
                    engine
                        .draw_with_preview(roster.participants(), |candidate| {
                            print!("\r🎲 {:<24}", candidate.name);
                            let _ = std::io::stdout().flush();
                        })
                        .await
                };

                match result {
                    Ok(_) => {
                        if !no_roll {
                            println!();
                        }
                        println!("🏆 第 {} 輪得獎者: {}", round, engine.display());
                        println!(
                            "   剩餘名額: {}",
                            engine.remaining(roster.participants())
                        );
                    }
                    Err(TeamError::EmptyPool) => {
                        println!("⚠️  沒有更多符合資格的參加者了");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("❌ Draw failed: {}", e);
                        return Err(e.into());
                    }
                }
            }

            if !engine.winners().is_empty() {
                println!("\n🏅 中獎名單 (新到舊):");
                for (rank, winner) in engine.ranked_winners() {
                    println!("   #{:<3} {}", rank, winner.name);
                }
            }
        }

        Command::Group {
            input,
            demo,
            size,
            ai_names,
            export: export_dir,
        } => {
            let roster = load_roster(input.as_deref(), demo).await?;
            let mut grouping = Grouping::new();
            grouping.partition(roster.participants(), size);

            if grouping.groups().is_empty() {
                println!("⚠️  名單是空的，沒有可分的組");
                return Ok(());
            }

            if ai_names {
                let config = match AppConfig::from_file(&args.config) {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!(
                            "Config '{}' unavailable ({}), naming will fall back",
                            args.config,
                            e
                        );
                        AppConfig::default()
                    }
                };

                let namer = GeminiNamer::new(config.naming());
                let (generation, names) = grouping.request_creative_names(&namer).await;
                grouping.apply_names(generation, names);
            }

            println!(
                "👥 共 {} 組，{} 人",
                grouping.groups().len(),
                roster.len()
            );
            for group in grouping.groups() {
                println!("\n📋 {} ({} 人)", group.name, group.members.len());
                for member in &group.members {
                    println!("   - {}", member.name);
                }
            }

            if let Some(dir) = export_dir {
                validation::validate_path("export", &dir)?;
                let storage = LocalStorage::new(dir);
                let filename = export::export_groups(&storage, grouping.groups()).await?;
                println!("\n✅ 已匯出: {}", filename);
            }
        }
    }

    Ok(())
}

/// 取得名單：範例資料、檔案，或標準輸入
async fn load_roster(input: Option<&str>, demo: bool) -> Result<Roster, Box<dyn std::error::Error>> {
    if demo {
        let roster = Roster::demo();
        tracing::info!("Loaded demo roster with {} entries", roster.len());
        return Ok(roster);
    }

    let text = match input {
        Some(path) => {
            if let Err(e) =
                validation::validate_file_extensions("input", &[path.to_string()], &["csv", "txt"])
            {
                tracing::error!("❌ {}", e);
                eprintln!("💡 名單檔請使用 .txt 或 .csv");
                return Err(e.into());
            }
            LocalStorage::new(".".to_string()).read_text(path).await?
        }
        None => {
            tracing::info!("Reading names from stdin");
            std::io::read_to_string(std::io::stdin())?
        }
    };

    Ok(Roster::from_text(&text))
}

fn report_roster(roster: &Roster) {
    println!("📋 目前名單: {} 人", roster.len());
    let counts = roster.name_counts();
    for (index, participant) in roster.participants().iter().enumerate() {
        let marker = if counts[&participant.name] > 1 {
            " (重複)"
        } else {
            ""
        };
        println!("   {:>3}. {}{}", index + 1, participant.name, marker);
    }

    let duplicates = roster.duplicate_names();
    if duplicates.is_empty() {
        println!("✅ 沒有重複的姓名");
    } else {
        println!("⚠️  發現重複的姓名:");
        for (name, count) in duplicates {
            println!("   {} × {}", name, count);
        }
    }
}
