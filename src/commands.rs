//! 子命令处理

use anyhow::{Result, anyhow};
use std::path::PathBuf;

use crate::cli::{GenerateArgs, HistoryCommand, SettingsCommand};
use crate::generator::context::GeneratorContext;
use crate::generator::workflow::launch;
use crate::llm::LLMClient;
use crate::storage::{HistoryEntry, SettingsUpdate, mask_api_key};
use crate::utils::topics::parse_topics;
use crate::utils::tree_formatter::TreeFormatter;

pub async fn handle_generate(context: &GeneratorContext, args: GenerateArgs) -> Result<()> {
    let json = args.json;
    let options = args.into_options();
    let save = options.save;

    let entry = launch(context, &options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    print_entry(&entry);
    if save {
        println!("💾 已保存到历史记录: {}", entry.id());
    }
    println!("✅ Subtopics generated successfully!");
    Ok(())
}

pub fn handle_history(context: &GeneratorContext, command: HistoryCommand) -> Result<()> {
    let store = &context.history_store;

    match command {
        HistoryCommand::List { query, favorites } => {
            let total = store.backfill_summaries()?.len();
            let entries: Vec<HistoryEntry> = store
                .search(query.as_deref().unwrap_or_default())
                .into_iter()
                .filter(|entry| !favorites || entry.is_favorite)
                .collect();

            if entries.is_empty() {
                println!("📭 没有匹配的历史记录 (共 {} 条)", total);
                return Ok(());
            }

            println!("📚 历史记录 ({} / {})", entries.len(), total);
            for entry in &entries {
                let star = if entry.is_favorite { "★" } else { " " };
                let nodes = entry.summary.map(|s| s.total_nodes).unwrap_or_default();
                println!(
                    "{} {}  {}  {}  depth={} nodes={} {}",
                    star,
                    entry.id(),
                    entry.result.created_at.format("%b %d, %Y %I:%M %p"),
                    entry.result.topics.join(", "),
                    entry.result.max_level,
                    nodes,
                    if entry.result.use_demo_mode { "[demo]" } else { "" }
                );
            }
        }
        HistoryCommand::Show { id, json } => {
            let mut entry = store
                .get_entry(&id)
                .ok_or_else(|| anyhow!("History entry not found: {}", id))?;
            if entry.summary.is_none() {
                store.backfill_summaries()?;
                entry = store
                    .get_entry(&id)
                    .ok_or_else(|| anyhow!("History entry not found: {}", id))?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                print_entry(&entry);
            }
        }
        HistoryCommand::Export { output, id } => {
            let output = output.unwrap_or_else(|| match &id {
                Some(id) => PathBuf::from(format!("{}.json", id)),
                None => PathBuf::from("topic-history.json"),
            });
            let count = store.export(&output, id.as_deref())?;
            println!("💾 已导出 {} 条记录到 {}", count, output.display());
        }
        HistoryCommand::Favorite { id, on, off } => {
            let value = match (on, off) {
                (true, _) => store.set_favorite(&id, true)?.then_some(true),
                (_, true) => store.set_favorite(&id, false)?.then_some(false),
                _ => store.toggle_favorite(&id)?,
            };
            match value {
                Some(true) => println!("⭐ Pinned to favorites"),
                Some(false) => println!("☆ Removed from favorites"),
                None => return Err(anyhow!("History entry not found: {}", id)),
            }
        }
        HistoryCommand::Clear => {
            store.clear()?;
            println!("🧹 History cleared.");
        }
    }

    Ok(())
}

pub fn handle_settings(context: &GeneratorContext, command: SettingsCommand) -> Result<()> {
    let settings = match command {
        SettingsCommand::Show => context.settings(),
        SettingsCommand::Set {
            api_key,
            clear_api_key,
            model,
            depth,
            temperature,
            demo_mode,
            topics,
        } => {
            let api_key = if clear_api_key {
                Some(String::new())
            } else {
                api_key.filter(|key| !key.trim().is_empty())
            };
            let update = SettingsUpdate {
                api_key,
                default_model: model,
                default_depth: depth,
                default_temperature: temperature,
                default_demo_mode: demo_mode,
                default_topics: topics.map(|raw| parse_topics(&raw, &[])),
            };
            let saved = context.settings_store.save(update)?;
            println!("✅ Settings updated successfully.");
            saved
        }
    };

    let has_api_key =
        !settings.api_key.trim().is_empty() || !context.config.llm.api_key.trim().is_empty();
    println!("API key:        {}", mask_api_key(&settings.api_key));
    println!("Key available:  {}", has_api_key);
    println!("Model:          {}", settings.default_model);
    println!("Depth:          {}", settings.default_depth);
    println!("Temperature:    {}", settings.default_temperature);
    println!("Demo mode:      {}", settings.default_demo_mode);
    println!("Default topics: {}", settings.default_topics.join(", "));
    Ok(())
}

pub async fn handle_models(context: &GeneratorContext) -> Result<()> {
    let settings = context.settings();
    let api_key = context.resolve_api_key(&settings, None);

    let models = if api_key.is_empty() {
        Vec::new()
    } else {
        LLMClient::new(&context.config.llm, &api_key)?.list_models().await
    };

    if models.is_empty() {
        println!("⚠️ 无法从接口获取模型列表，使用配置中的模型:");
        for model in &context.config.available_models {
            println!("  {}", model);
        }
    } else {
        for model in &models {
            println!("  {}", model);
        }
    }
    Ok(())
}

fn print_entry(entry: &HistoryEntry) {
    let result = &entry.result;
    println!(
        "🌳 {}  model={} depth={} temperature={} mode={}",
        result.id,
        result.model,
        result.max_level,
        result.temperature,
        if result.use_demo_mode { "demo" } else { "live" }
    );
    for tree in &result.trees {
        println!();
        print!("{}", TreeFormatter::format_tree(tree));
    }
    if let Some(summary) = &entry.summary {
        println!("\n📊 {}", TreeFormatter::format_summary(summary));
    }
}
