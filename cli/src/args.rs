use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use bigcrack_core::constants::{DEFAULT_BIS_INDEX, DEFAULT_CHECK_INTERVAL};

#[derive(Parser, Debug)]
#[command(name = "bigcrack")]
#[command(about = "Recover LE Audio Broadcast Codes from a captured BIS PDU", version)]
pub struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for the Broadcast Code of a capture
    Crack(CrackArgs),
    /// Write a synthetic capture sealed under a known code
    Forge(ForgeArgs),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Every hex string of --bc-length bytes
    Numeric,
    /// One candidate per line of --wordlist
    Wordlist,
}

#[derive(Args, Debug)]
pub struct CrackArgs {
    #[arg(long, value_enum)]
    pub mode: ModeArg,

    /// Encrypted BIS PDU (raw binary)
    #[arg(long)]
    pub pdu: PathBuf,

    /// BIGInfo record (raw binary, 57 bytes)
    #[arg(long)]
    pub biginfo: PathBuf,

    /// Payload counter of the captured PDU
    #[arg(long)]
    pub payload_count: u64,

    /// Code length in bytes for numeric mode (1..=7)
    #[arg(long, default_value_t = 2)]
    pub bc_length: u8,

    /// Dictionary for wordlist mode
    #[arg(long, required_if_eq("mode", "wordlist"))]
    pub wordlist: Option<PathBuf>,

    /// Worker threads (default: logical CPUs)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Candidates between flag checks and progress reports
    #[arg(long, default_value_t = DEFAULT_CHECK_INTERVAL)]
    pub check_interval: u64,

    /// Extra radio octet before the payload (1 for Nordic sniffers)
    #[arg(long, default_value_t = 0)]
    pub hw_offset: u8,

    /// BIS the PDU was captured on
    #[arg(long, default_value_t = DEFAULT_BIS_INDEX)]
    pub bis: u8,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ForgeArgs {
    /// Broadcast Code to seal under (1..=16 bytes)
    #[arg(long)]
    pub code: String,

    #[arg(long)]
    pub payload_count: u64,

    /// Plaintext payload, hex
    #[arg(long)]
    pub plaintext: String,

    #[arg(long)]
    pub out_pdu: PathBuf,

    #[arg(long)]
    pub out_biginfo: PathBuf,

    /// RNG seed for GIV, GSKD and the seed access address
    #[arg(long)]
    pub seed: Option<u64>,

    /// PDU header octet
    #[arg(long, default_value_t = 0)]
    pub header: u8,

    #[arg(long, default_value_t = 0)]
    pub hw_offset: u8,

    #[arg(long, default_value_t = DEFAULT_BIS_INDEX)]
    pub bis: u8,
}
