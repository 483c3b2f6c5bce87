// ==========================================
// MSME 补贴分配优化系统 - 命令行入口
// ==========================================
// 用法:
//   subsidy-optimizer optimize [--budget B] [--w-rev R] [--w-emp E]
//   subsidy-optimizer tradeoff [--budget B]
//   subsidy-optimizer advise <ENTITY_ID>
//   subsidy-optimizer simulate
//
// 数据表路径来自配置文件或环境变量
// SUBSIDY_OPTIMIZER_ENTITIES / SUBSIDY_OPTIMIZER_INSTRUMENTS
// 结果以 JSON 输出到 stdout，日志输出到 stderr
// ==========================================

use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use subsidy_optimizer::config::OptimizerConfig;
use subsidy_optimizer::importer::FileRecordSource;
use subsidy_optimizer::{logging, perf, OptimizationApi};

const USAGE: &str = "usage: subsidy-optimizer <optimize|tradeoff|advise|simulate> [options]
  optimize [--budget B] [--w-rev R] [--w-emp E]
  tradeoff [--budget B]
  advise <ENTITY_ID>
  simulate";

#[derive(Debug, PartialEq)]
enum Command {
    Optimize {
        budget: Option<f64>,
        w_rev: Option<f64>,
        w_emp: Option<f64>,
    },
    Tradeoff {
        budget: Option<f64>,
    },
    Advise {
        entity_id: String,
    },
    Simulate,
}

fn parse_number(flag: &str, value: Option<String>) -> anyhow::Result<f64> {
    let raw = value.ok_or_else(|| anyhow!("{} 缺少参数值", flag))?;
    raw.trim()
        .parse::<f64>()
        .with_context(|| format!("{} 参数值无效: {}", flag, raw))
}

fn parse_command<I>(args: I) -> anyhow::Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let sub = args.next().ok_or_else(|| anyhow!("{}", USAGE))?;

    match sub.as_str() {
        "optimize" => {
            let (mut budget, mut w_rev, mut w_emp) = (None, None, None);
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--budget" => budget = Some(parse_number("--budget", args.next())?),
                    // 兼容下划线写法
                    "--w-rev" | "--w_rev" => w_rev = Some(parse_number("--w-rev", args.next())?),
                    "--w-emp" | "--w_emp" => w_emp = Some(parse_number("--w-emp", args.next())?),
                    other => bail!("未知参数: {}\n{}", other, USAGE),
                }
            }
            Ok(Command::Optimize {
                budget,
                w_rev,
                w_emp,
            })
        }
        "tradeoff" => {
            let mut budget = None;
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--budget" => budget = Some(parse_number("--budget", args.next())?),
                    other => bail!("未知参数: {}\n{}", other, USAGE),
                }
            }
            Ok(Command::Tradeoff { budget })
        }
        "advise" => {
            let entity_id = args
                .next()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| anyhow!("advise 需要 ENTITY_ID\n{}", USAGE))?;
            Ok(Command::Advise { entity_id })
        }
        "simulate" => Ok(Command::Simulate),
        other => bail!("未知子命令: {}\n{}", other, USAGE),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    perf::configure_from_env();

    let command = parse_command(std::env::args().skip(1))?;

    let config = OptimizerConfig::load().context("加载配置失败")?;
    let source = FileRecordSource::from_paths(
        config.entity_table_path.clone(),
        config.instrument_table_path.clone(),
    )
    .context("数据表路径未配置")?;

    let defaults = config.default_weights();
    let default_budget = config.default_budget;
    let api = OptimizationApi::new(Arc::new(source), Arc::new(config));

    match command {
        Command::Optimize {
            budget,
            w_rev,
            w_emp,
        } => {
            let result = api
                .optimize(
                    budget.unwrap_or(default_budget),
                    w_rev.unwrap_or(defaults.w_rev),
                    w_emp.unwrap_or(defaults.w_emp),
                )
                .await?;
            print_json(&result)
        }
        Command::Tradeoff { budget } => {
            let points = api.tradeoff(budget.unwrap_or(default_budget)).await?;
            print_json(&points)
        }
        Command::Advise { entity_id } => {
            let recommendations = api.advise(&entity_id).await?;
            print_json(&recommendations)
        }
        Command::Simulate => {
            let projections = api.simulate().await?;
            print_json(&projections)
        }
    }
}
