//! zkledger CLI Tool
//!
//! Derives parameter sets and drives a full ledger lifecycle (genesis,
//! transfer, audit and both verification stages) against an in-memory store.

use anyhow::{bail, Context, Result};
use audit::OrgKeyPair;
use bulletproofs_core::ParameterSet;
use clap::{value_parser, Arg, ArgMatches, Command};
use ledger::{
    telemetry, AuditSpecification, Ledger, LedgerConfig, MemoryStore, OrgId, TxSpecification,
};
use rand::rngs::OsRng;
use tracing::info;

fn main() -> Result<()> {
    let config = LedgerConfig::from_env().context("Failed to load configuration")?;
    telemetry::init(&config.log_filter);

    let matches = Command::new("zkledger")
        .about("Confidential ledger proofs: range proofs, audit tokens and row verification")
        .subcommand_required(true)
        .subcommand(
            Command::new("params")
                .about("Derive a parameter set and print its fingerprint")
                .arg(
                    Arg::new("vector-length")
                        .short('n')
                        .long("vector-length")
                        .value_name("N")
                        .help("Range proof width (power of two, defaults to the configured value)")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("demo")
                .about("Run genesis, one transfer, the audit and both verification stages")
                .arg(
                    Arg::new("orgs")
                        .long("orgs")
                        .value_name("N")
                        .help("Number of organizations (defaults to the configured value)")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("asset")
                        .long("asset")
                        .value_name("AMOUNT")
                        .help("Amount issued to org0 at genesis")
                        .value_parser(value_parser!(i64))
                        .default_value("1000"),
                )
                .arg(
                    Arg::new("value")
                        .long("value")
                        .value_name("AMOUNT")
                        .help("Amount org0 transfers to org1")
                        .value_parser(value_parser!(i64))
                        .default_value("100"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("params", sub)) => run_params(&config, sub),
        Some(("demo", sub)) => run_demo(&config, sub),
        _ => unreachable!("a subcommand is required"),
    }
}

fn run_params(config: &LedgerConfig, matches: &ArgMatches) -> Result<()> {
    let vector_length = matches
        .get_one::<usize>("vector-length")
        .copied()
        .unwrap_or(config.vector_length);

    let params = ParameterSet::derive(vector_length)
        .with_context(|| format!("Failed to derive parameters for V = {}", vector_length))?;

    println!("Parameter set");
    println!("  Vector length: {}", params.vector_length());
    println!("  Generators:    {}", 2 * params.vector_length() + 3);
    println!("  G:             {}", hex::encode(params.g().to_bytes()));
    println!("  H:             {}", hex::encode(params.h().to_bytes()));
    println!("  U:             {}", hex::encode(params.u().to_bytes()));
    println!("  Fingerprint:   {}", hex::encode(params.fingerprint()));
    Ok(())
}

fn run_demo(config: &LedgerConfig, matches: &ArgMatches) -> Result<()> {
    let orgs = matches.get_one::<usize>("orgs").copied().unwrap_or(config.organizations);
    let asset = *matches.get_one::<i64>("asset").context("missing --asset")?;
    let value = *matches.get_one::<i64>("value").context("missing --value")?;
    if orgs < 2 {
        bail!("the demo needs at least two organizations, got {}", orgs);
    }
    if value > asset {
        bail!("org0 cannot transfer {} out of {}", value, asset);
    }

    let params = config.parameters().context("Failed to derive parameters")?;
    let keys = OrgKeyPair::generate_many(&params, orgs, &mut OsRng);
    let pks: Vec<_> = keys.iter().map(|k| k.public).collect();
    let mut ledger = Ledger::new(params, pks.clone(), MemoryStore::new());

    let mut assets = vec![0i64; orgs];
    assets[0] = asset;
    let genesis = TxSpecification::genesis(&pks, &assets, &mut OsRng)?;
    let genesis_key = ledger.append_row(&genesis)?;
    for (i, pair) in keys.iter().enumerate() {
        let org = OrgId::try_from(i)?;
        ledger.verify_step_one(genesis_key, org, &pair.secret, assets[i])?;
    }
    println!(
        "Row {} (genesis): IsValidBalCor = {}",
        genesis_key,
        ledger.row(genesis_key)?.is_valid_bal_cor
    );

    let spender = OrgId(0);
    let receiver = OrgId(1);
    let tx = TxSpecification::transfer(&pks, spender, receiver, value, &mut OsRng)?;
    let key = ledger.append_row(&tx)?;
    info!(row = key, value, "transfer appended");

    for (i, pair) in keys.iter().enumerate() {
        let org = OrgId::try_from(i)?;
        let valid = ledger.verify_step_one(key, org, &pair.secret, tx.values[i])?;
        println!("Row {} {}: stage one = {}", key, org, valid);
    }

    let spec = AuditSpecification::new(&tx, &keys[0], asset - value, receiver, value)?;
    ledger.audit(key, &spec, &mut OsRng).context("Audit step failed")?;

    for (i, pair) in keys.iter().enumerate().skip(1) {
        let org = OrgId::try_from(i)?;
        let valid = ledger.verify_step_two(key, org, Some(&pair.secret))?;
        println!("Row {} {}: stage two with consistency = {}", key, org, valid);
    }
    ledger.verify_step_two_all(key)?;

    let row = ledger.row(key)?;
    println!("Row {} (transfer):", key);
    println!("  IsValidBalCor: {}", row.is_valid_bal_cor);
    println!("  IsValidAsset:  {}", row.is_valid_asset);
    Ok(())
}
