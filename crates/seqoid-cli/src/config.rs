use anyhow::{Context, bail};
use clap::{ArgGroup, Parser, ValueEnum};
use seqoid::{
    HardwareAddress, MachineIdSource, ObjectId, OsRandom, RandomMachineId, StaticMachineId,
    low_order_bytes, parse_mac,
};

/// Upper bound on `--count`, to keep a typo from flooding the terminal.
const MAX_COUNT: usize = 10_000_000;

/// Output rendering for each generated identifier.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// 24 lowercase hex characters (canonical).
    Hex,
    /// The 96-bit value as an unsigned decimal integer.
    Decimal,
    /// 20 Crockford Base32 characters.
    Base32,
    /// 12 raw bytes per identifier, no separators.
    Bytes,
}

/// Command-line arguments for the `seqoid` binary.
///
/// Every flag can also be set through its environment variable or a `.env`
/// file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "seqoid",
    version,
    about = "Generate sortable 12-byte ObjectId-style identifiers"
)]
#[command(group(
    ArgGroup::new("machine")
        .args(["machine_id", "interface", "random_machine_id"])
        .multiple(false)
))]
pub struct CliArgs {
    /// Number of identifiers to generate.
    ///
    /// Environment variable: `SEQOID_COUNT`
    #[arg(short = 'n', long, env = "SEQOID_COUNT", default_value_t = 1)]
    pub count: usize,

    /// Output encoding.
    ///
    /// Environment variable: `SEQOID_FORMAT`
    #[arg(short, long, env = "SEQOID_FORMAT", value_enum, default_value_t = Format::Hex)]
    pub format: Format,

    /// Use this 3-byte machine id (6 hex characters) instead of discovering
    /// one from the network hardware.
    ///
    /// Environment variable: `SEQOID_MACHINE_ID`
    #[arg(long, env = "SEQOID_MACHINE_ID")]
    pub machine_id: Option<String>,

    /// Derive the machine id from this network interface (e.g. `eth0`).
    ///
    /// Environment variable: `SEQOID_INTERFACE`
    #[arg(long, env = "SEQOID_INTERFACE")]
    pub interface: Option<String>,

    /// Use a random machine id. Only suitable for hosts that have no usable
    /// hardware address; random ids collide across hosts far more readily.
    ///
    /// Environment variable: `SEQOID_RANDOM_MACHINE_ID`
    #[arg(long, env = "SEQOID_RANDOM_MACHINE_ID", default_value_t = false)]
    pub random_machine_id: bool,

    /// Start the sequence counter at `|seed| mod 2^24` instead of a random
    /// value.
    ///
    /// Environment variable: `SEQOID_SEED`
    #[arg(long, env = "SEQOID_SEED", allow_negative_numbers = true)]
    pub seed: Option<i64>,
}

/// Where the machine id comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineSource {
    /// Discover it from the first usable network interface.
    Hardware,
    /// Discover it from the named network interface.
    Interface(String),
    /// A fixed, configured value.
    Static([u8; 3]),
    /// A random value drawn from the OS.
    Random,
}

impl MachineSource {
    pub fn into_source(self) -> Box<dyn MachineIdSource> {
        match self {
            Self::Hardware => Box::new(HardwareAddress::new()),
            Self::Interface(name) => Box::new(HardwareAddress::with_interface(name)),
            Self::Static(id) => Box::new(StaticMachineId::new(id)),
            Self::Random => Box::new(RandomMachineId::new(OsRandom)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub count: usize,
    pub format: Format,
    pub machine: MachineSource,
    pub seed: Option<i64>,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.count == 0 {
            bail!("SEQOID_COUNT must be greater than 0");
        }
        if args.count > MAX_COUNT {
            bail!(
                "SEQOID_COUNT ({}) exceeds the maximum of {MAX_COUNT}",
                args.count
            );
        }

        let machine = match (args.machine_id, args.interface, args.random_machine_id) {
            (None, None, false) => MachineSource::Hardware,
            (Some(raw), None, false) => MachineSource::Static(parse_machine_id(&raw)?),
            (None, Some(name), false) => {
                if name.trim().is_empty() {
                    bail!("SEQOID_INTERFACE must not be empty");
                }
                MachineSource::Interface(name)
            }
            (None, None, true) => MachineSource::Random,
            _ => bail!(
                "SEQOID_MACHINE_ID, SEQOID_INTERFACE and SEQOID_RANDOM_MACHINE_ID are mutually exclusive"
            ),
        };

        Ok(Self {
            count: args.count,
            format: args.format,
            machine,
            seed: args.seed,
        })
    }
}

/// Accepts `aabbcc`, `0xaabbcc`, or a full hardware address whose low-order
/// three bytes are kept (`00:1a:2b:aa:bb:cc`).
fn parse_machine_id(raw: &str) -> anyhow::Result<[u8; 3]> {
    let raw = raw.trim();
    if let Some(mac) = parse_mac(raw) {
        return Ok(low_order_bytes(&mac));
    }

    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        bail!("SEQOID_MACHINE_ID must be 6 hex characters, got {raw:?}");
    }
    let value = u32::from_str_radix(digits, 16)
        .with_context(|| format!("SEQOID_MACHINE_ID is not valid hex: {raw:?}"))?;
    let [_, a, b, c] = value.to_be_bytes();
    Ok([a, b, c])
}

/// Renders `id` in a textual format. [`Format::Bytes`] has no textual form.
pub fn render(id: &ObjectId, format: Format) -> Option<String> {
    use seqoid::Base32Ext;

    match format {
        Format::Hex => Some(id.to_hex()),
        Format::Decimal => Some(id.to_decimal()),
        Format::Base32 => Some(id.encode()),
        Format::Bytes => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Config> {
        let args = CliArgs::try_parse_from(std::iter::once("seqoid").chain(args.iter().copied()))?;
        Config::try_from(args)
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.count, 1);
        assert_eq!(config.format, Format::Hex);
        assert_eq!(config.machine, MachineSource::Hardware);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn static_machine_id_forms() {
        for raw in ["aabbcc", "0xAABBCC", "00:1a:2b:aa:bb:cc", "00-1A-2B-AA-BB-CC"] {
            let config = parse(&["--machine-id", raw]).unwrap();
            assert_eq!(config.machine, MachineSource::Static([0xaa, 0xbb, 0xcc]), "{raw}");
        }
    }

    #[test]
    fn rejects_bad_machine_id() {
        assert!(parse(&["--machine-id", "abc"]).is_err());
        assert!(parse(&["--machine-id", "gggggg"]).is_err());
        assert!(parse(&["--machine-id", "aabbccdd"]).is_err());
    }

    #[test]
    fn machine_sources_are_exclusive() {
        assert!(parse(&["--machine-id", "aabbcc", "--interface", "eth0"]).is_err());
        assert!(parse(&["--interface", "eth0", "--random-machine-id"]).is_err());
        assert_eq!(
            parse(&["--interface", "eth0"]).unwrap().machine,
            MachineSource::Interface("eth0".into())
        );
        assert_eq!(
            parse(&["--random-machine-id"]).unwrap().machine,
            MachineSource::Random
        );
    }

    #[test]
    fn count_bounds() {
        assert!(parse(&["--count", "0"]).is_err());
        assert!(parse(&["--count", "10000001"]).is_err());
        assert_eq!(parse(&["-n", "5"]).unwrap().count, 5);
    }

    #[test]
    fn negative_seed_is_accepted() {
        let config = parse(&["--seed", "-42", "--format", "base32"]).unwrap();
        assert_eq!(config.seed, Some(-42));
        assert_eq!(config.format, Format::Base32);
    }

    #[test]
    fn renders_each_text_format() {
        let id: ObjectId = "65a1b2c3aabbcc1234deadbe".parse().unwrap();
        assert_eq!(render(&id, Format::Hex).unwrap(), "65a1b2c3aabbcc1234deadbe");
        assert_eq!(render(&id, Format::Decimal).unwrap(), id.to_u128().to_string());
        assert_eq!(render(&id, Format::Base32).unwrap().len(), 20);
        assert_eq!(render(&id, Format::Bytes), None);
    }
}
