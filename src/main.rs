use clap::Parser;
use delivery_ledger::env::{Env, setup_tracing};
use delivery_ledger::run;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv_override().ok();
    let env = Env::try_parse()?;
    setup_tracing(&env.log_level);
    run(&env)?;
    Ok(())
}
