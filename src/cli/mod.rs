use crate::config::Config;
use crate::generator::context::GenerateOptions;
use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Subtopic Explorer - 由大模型驱动的递归主题树生成引擎
#[derive(Parser, Debug)]
#[command(name = "subtopic-explorer")]
#[command(
    about = "Recursively expands seed topics into a hierarchy of subtopics using an OpenAI-compatible chat API, with a deterministic offline demo mode."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 数据目录（历史记录与设置）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 生成主题树
    Generate(GenerateArgs),

    /// 历史记录管理
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// 用户设置管理
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// 列出可用模型
    Models,
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    /// 种子主题，可用逗号分隔多个
    pub topics: Vec<String>,

    /// 最大层级 (1-6)
    #[arg(short, long)]
    pub depth: Option<i64>,

    /// 温度参数 (0.0-1.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// 模型名称
    #[arg(short, long)]
    pub model: Option<String>,

    /// 强制使用演示模式
    #[arg(long, conflicts_with = "live")]
    pub demo: bool,

    /// 强制使用 live 模式，没有 API KEY 时直接报错
    #[arg(long)]
    pub live: bool,

    /// API KEY，覆盖设置与环境变量
    #[arg(long)]
    pub api_key: Option<String>,

    /// 以 JSON 输出结果
    #[arg(long)]
    pub json: bool,

    /// 不写入历史记录
    #[arg(long)]
    pub no_save: bool,
}

impl GenerateArgs {
    pub fn into_options(self) -> GenerateOptions {
        let demo_mode = match (self.demo, self.live) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        GenerateOptions {
            topics: self.topics,
            depth: self.depth,
            temperature: self.temperature,
            model: self.model,
            demo_mode,
            api_key: self.api_key,
            save: !self.no_save,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// 列出历史记录
    List {
        /// 按主题搜索
        #[arg(short, long)]
        query: Option<String>,

        /// 只显示收藏
        #[arg(long)]
        favorites: bool,
    },

    /// 查看单条历史记录
    Show {
        id: String,

        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 导出历史记录为 JSON 文件
    Export {
        /// 输出文件路径
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 只导出指定条目
        #[arg(long)]
        id: Option<String>,
    },

    /// 设置或切换收藏状态
    Favorite {
        id: String,

        #[arg(long, conflicts_with = "off")]
        on: bool,

        #[arg(long)]
        off: bool,
    },

    /// 清空历史记录
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// 显示当前设置
    Show,

    /// 修改设置
    Set {
        #[arg(long, conflicts_with = "clear_api_key")]
        api_key: Option<String>,

        #[arg(long)]
        clear_api_key: bool,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        depth: Option<i64>,

        #[arg(long)]
        temperature: Option<f64>,

        #[arg(long)]
        demo_mode: Option<bool>,

        /// 默认主题，可用逗号或换行分隔
        #[arg(long)]
        topics: Option<String>,
    },
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(data_dir) = &self.data_dir {
            config = config.with_data_dir(data_dir);
        }
        if self.verbose {
            config.verbose = true;
        }

        Ok(config)
    }
}
