use log::{info, warn};
use miette::{IntoDiagnostic, Report, Result};

use scuttle_ddl::{AggregateType, ColumnDefinition, PrimitiveType, TypeDef};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(false)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();

    let columns = vec![
        ColumnDefinition::new("id", TypeDef::new(PrimitiveType::BigInt))
            .with_key(true)
            .with_default_value("-1")
            .with_comment("user id"),
        ColumnDefinition::new("name", TypeDef::varchar(32))
            .with_key(true)
            .with_comment("user name"),
        ColumnDefinition::new("pv", TypeDef::new(PrimitiveType::BigInt))
            .with_aggregate_type(Some(AggregateType::Sum))
            .with_nullable(true)
            .with_default_value("-1")
            .with_comment("page visit"),
        ColumnDefinition::new("uv", TypeDef::new(PrimitiveType::Hll))
            .with_aggregate_type(Some(AggregateType::HllUnion))
            .with_comment("unique visitors"),
        ColumnDefinition::new("balance", TypeDef::decimal(5, 2))
            .with_aggregate_type(Some(AggregateType::Replace))
            .with_default_value("1234.5"),
        ColumnDefinition::new("score", TypeDef::new(PrimitiveType::Float))
            .with_key(true)
            .with_comment("rating"),
    ];

    info!("analyzing {} column definitions", columns.len());

    let mut accepted = Vec::new();
    for column in &columns {
        match column.analyze(true) {
            Ok(analyzed) => accepted.push(analyzed),
            Err(err) => {
                warn!("rejected column `{}`", column.name());
                println!("{:?}", Report::new(err).with_source_code(column.to_sql()));
            }
        }
    }

    println!("CREATE TABLE users (");
    let rendered = accepted
        .iter()
        .map(|column| format!("    {}", column.to_sql()))
        .collect::<Vec<_>>()
        .join(",\n");
    println!("{rendered}");
    println!(")");

    Ok(())
}
