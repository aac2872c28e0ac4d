//! Cyclic redundancy checks in the Rocksoft parameter model
//!
//! | Parameter | Description |
//! |-----------|-------------|
//! | `width`   | CRC width in bits, 8 to 64 in whole bytes |
//! | `poly`    | Generator polynomial, unreflected |
//! | `init`    | Initial register value, unreflected |
//! | `refin`   | Process input bytes LSB first |
//! | `refout`  | Reflect the register before the final XOR |
//! | `xorout`  | Final XOR value |
//!
//! Catalogued CRCs use a 256-entry table by default and a bitwise
//! register as their alternate strategy. Both produce identical output.
//! Tables are built once per parameter set and shared between engines.

use crate::Result;
use crate::error::{InternalError, ResolutionError, ValidationError};
use crate::hashing::descriptor::AlgorithmDescriptor;
use crate::hashing::engine::{Checksum, ChecksumEngine};
use crate::hashing::registry::AlgorithmRegistry;
use crate::hashing::traits::{Selector, StreamingHasher};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Prefix of the customizable CRC, `crc:<width>,<poly>,<init>,<refin>,<refout>,<xorout>`
pub const GENERIC_PREFIX: &str = "crc:";

/// Rocksoft model parameters of one CRC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrcParams {
    pub width: u32,
    pub poly: u64,
    pub init: u64,
    pub refin: bool,
    pub refout: bool,
    pub xorout: u64,
}

impl CrcParams {
    pub const fn new(
        width: u32,
        poly: u64,
        init: u64,
        refin: bool,
        refout: bool,
        xorout: u64,
    ) -> Self {
        Self {
            width,
            poly,
            init,
            refin,
            refout,
            xorout,
        }
    }

    /// Parse `<width>,<poly>,<init>,<refin>,<refout>,<xorout>`
    ///
    /// The width is decimal, polynomial and register values are hexadecimal
    /// with an optional `0x` prefix, reflection flags are `true` or `false`.
    pub fn parse(definition: &str) -> std::result::Result<Self, ValidationError> {
        let fields: Vec<&str> = definition.split(',').map(str::trim).collect();
        let [width, poly, init, refin, refout, xorout] = fields.as_slice() else {
            return Err(ValidationError::invalid_parameter(
                "crc",
                &format!("expected 6 comma separated values, found {}", fields.len()),
            ));
        };

        let width = width
            .parse::<u32>()
            .map_err(|_| ValidationError::invalid_parameter("width", "not a decimal number"))?;
        let params = Self::new(
            width,
            parse_hex("poly", poly)?,
            parse_hex("init", init)?,
            parse_flag("refin", refin)?,
            parse_flag("refout", refout)?,
            parse_hex("xorout", xorout)?,
        );
        params.validate()?;
        Ok(params)
    }

    /// Check the width is byte aligned and every value fits into it
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if !(8..=64).contains(&self.width) || self.width % 8 != 0 {
            return Err(ValidationError::invalid_parameter(
                "width",
                &format!("{} is not a whole number of bytes between 8 and 64", self.width),
            ));
        }

        let mask = self.mask();
        let values = [
            ("poly", self.poly),
            ("init", self.init),
            ("xorout", self.xorout),
        ];
        for (parameter, value) in values {
            if value & !mask != 0 {
                return Err(ValidationError::invalid_parameter(
                    parameter,
                    &format!("{value:#x} does not fit into {} bits", self.width),
                ));
            }
        }
        Ok(())
    }

    fn mask(&self) -> u64 {
        u64::MAX >> (64 - self.width)
    }

    fn top_bit(&self) -> u64 {
        1 << (self.width - 1)
    }

    /// Register value after `init`, in the register's bit order
    fn initial_register(&self) -> u64 {
        if self.refin {
            reflect(self.init, self.width)
        } else {
            self.init
        }
    }
}

fn parse_hex(parameter: &str, value: &str) -> std::result::Result<u64, ValidationError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u64::from_str_radix(digits, 16)
        .map_err(|_| ValidationError::invalid_parameter(parameter, "not a hexadecimal number"))
}

fn parse_flag(parameter: &str, value: &str) -> std::result::Result<bool, ValidationError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ValidationError::invalid_parameter(parameter, "expected true or false"))
    }
}

fn reflect(value: u64, width: u32) -> u64 {
    value.reverse_bits() >> (64 - width)
}

type Table = [u64; 256];

static TABLES: Lazy<RwLock<HashMap<CrcParams, Arc<Table>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Table for `params`, built on first use
fn shared_table(params: &CrcParams) -> Arc<Table> {
    let cached = TABLES
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(params)
        .cloned();
    if let Some(table) = cached {
        return table;
    }

    let table = Arc::new(build_table(params));
    let mut tables = TABLES
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Arc::clone(tables.entry(*params).or_insert(table))
}

#[derive(Clone)]
enum Strategy {
    Table(Arc<Table>),
    Bitwise,
}

/// Register plus update strategy shared by every CRC-based family
#[derive(Clone)]
pub(super) struct CrcCore {
    params: CrcParams,
    strategy: Strategy,
    register: u64,
}

impl CrcCore {
    pub(super) fn table_driven(params: CrcParams) -> Self {
        Self {
            params,
            strategy: Strategy::Table(shared_table(&params)),
            register: params.initial_register(),
        }
    }

    pub(super) fn bitwise(params: CrcParams) -> Self {
        Self {
            params,
            strategy: Strategy::Bitwise,
            register: params.initial_register(),
        }
    }

    pub(super) fn reset(&mut self) {
        self.register = self.params.initial_register();
    }

    pub(super) fn update(&mut self, data: &[u8]) {
        let params = &self.params;
        let mut register = self.register;
        match &self.strategy {
            Strategy::Table(table) if params.refin => {
                for &byte in data {
                    let index = ((register ^ u64::from(byte)) & 0xff) as usize;
                    register = (register >> 8) ^ table[index];
                }
            }
            Strategy::Table(table) => {
                let shift = params.width - 8;
                let mask = params.mask();
                for &byte in data {
                    let index = (((register >> shift) ^ u64::from(byte)) & 0xff) as usize;
                    register = ((register << 8) ^ table[index]) & mask;
                }
            }
            Strategy::Bitwise => {
                for &byte in data {
                    register = bitwise_step(params, register, byte);
                }
            }
        }
        self.register = register;
    }

    /// Final CRC value, right aligned
    pub(super) fn value(&self) -> u64 {
        let params = &self.params;
        let register = if params.refin == params.refout {
            self.register
        } else {
            reflect(self.register, params.width)
        };
        (register ^ params.xorout) & params.mask()
    }

    pub(super) fn width(&self) -> u32 {
        self.params.width
    }
}

fn bitwise_step(params: &CrcParams, mut register: u64, byte: u8) -> u64 {
    if params.refin {
        let poly = reflect(params.poly, params.width);
        register ^= u64::from(byte);
        for _ in 0..8 {
            register = if register & 1 != 0 {
                (register >> 1) ^ poly
            } else {
                register >> 1
            };
        }
        register
    } else {
        let top = params.top_bit();
        register ^= u64::from(byte) << (params.width - 8);
        for _ in 0..8 {
            register = if register & top != 0 {
                (register << 1) ^ params.poly
            } else {
                register << 1
            };
        }
        register & params.mask()
    }
}

fn build_table(params: &CrcParams) -> Table {
    let mut table = [0u64; 256];
    for (index, entry) in table.iter_mut().enumerate() {
        *entry = bitwise_step(params, 0, index as u8);
    }
    table
}

/// Big-endian bytes of the low `width` bits of `value`
pub(super) fn digest_bytes(value: u64, width: u32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    bytes[8 - (width / 8) as usize..].to_vec()
}

/// Streaming hasher for any CRC in the model
pub(super) struct Crc {
    core: CrcCore,
    reversed_output: bool,
}

impl Crc {
    pub(super) fn table_driven(params: CrcParams) -> Self {
        Self::with_core(CrcCore::table_driven(params))
    }

    pub(super) fn bitwise(params: CrcParams) -> Self {
        Self::with_core(CrcCore::bitwise(params))
    }

    fn with_core(core: CrcCore) -> Self {
        Self {
            core,
            reversed_output: false,
        }
    }

    /// Emit the digest least significant byte first
    fn reversed_output(mut self) -> Self {
        self.reversed_output = true;
        self
    }
}

impl StreamingHasher for Crc {
    fn reset(&mut self) {
        self.core.reset();
    }

    fn update(&mut self, data: &[u8]) {
        self.core.update(data);
    }

    fn digest(&self) -> Vec<u8> {
        let mut bytes = digest_bytes(self.core.value(), self.core.width());
        if self.reversed_output {
            bytes.reverse();
        }
        bytes
    }

    fn bit_width(&self) -> usize {
        self.core.width() as usize
    }
}

/// Selector for one catalogued CRC
pub struct CrcSelector {
    descriptor: AlgorithmDescriptor,
    params: CrcParams,
    reversed_output: bool,
}

impl CrcSelector {
    pub const fn new(descriptor: AlgorithmDescriptor, params: CrcParams) -> Self {
        Self {
            descriptor: descriptor.with_alternate(),
            params,
            reversed_output: false,
        }
    }

    /// Digest bytes come out least significant first
    pub const fn with_reversed_output(mut self) -> Self {
        self.reversed_output = true;
        self
    }
}

impl Selector for CrcSelector {
    fn descriptors(&self) -> &[AlgorithmDescriptor] {
        std::slice::from_ref(&self.descriptor)
    }

    fn instantiate(
        &self,
        name: &str,
        alternate: bool,
        _registry: &AlgorithmRegistry,
    ) -> Result<ChecksumEngine> {
        self.params
            .validate()
            .map_err(|err| InternalError::instantiation_failure(name, err.to_string()))?;
        Ok(build_engine(name, self.params, alternate, self.reversed_output))
    }
}

/// Selector for `crc:<width>,<poly>,<init>,<refin>,<refout>,<xorout>`
pub struct CrcGenericSelector;

impl Selector for CrcGenericSelector {
    fn descriptors(&self) -> &[AlgorithmDescriptor] {
        &[]
    }

    fn matches(&self, name: &str) -> bool {
        name.get(..GENERIC_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(GENERIC_PREFIX))
    }

    fn instantiate(
        &self,
        name: &str,
        alternate: bool,
        _registry: &AlgorithmRegistry,
    ) -> Result<ChecksumEngine> {
        let definition = name.get(GENERIC_PREFIX.len()..).unwrap_or_default();
        let params = CrcParams::parse(definition)
            .map_err(|err| ResolutionError::unsupported_parametrization(name, err.to_string()))?;
        Ok(build_engine(name, params, alternate, false))
    }
}

fn build_engine(
    name: &str,
    params: CrcParams,
    alternate: bool,
    reversed_output: bool,
) -> ChecksumEngine {
    let mut crc = if alternate {
        Crc::bitwise(params)
    } else {
        Crc::table_driven(params)
    };
    if reversed_output {
        crc = crc.reversed_output();
    }
    Checksum::new(name, Box::new(crc))
        .with_alternate_used(alternate)
        .into()
}

pub(super) const CRC32_PARAMS: CrcParams =
    CrcParams::new(32, 0x04C1_1DB7, 0xFFFF_FFFF, true, true, 0xFFFF_FFFF);

pub(super) const POSIX_PARAMS: CrcParams = CrcParams::new(32, 0x04C1_1DB7, 0, false, false, 0);

pub const CRC64: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc64", "CRC-64 (ISO 3309)", &["crc-64", "crc64_iso"], 64),
    CrcParams::new(64, 0x1B, 0, true, true, 0),
);

pub const CRC64_ECMA182: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new(
        "crc64_ecma182",
        "CRC-64 (ECMA-182)",
        &["crc64_ecma", "crc-64_ecma-182"],
        64,
    ),
    CrcParams::new(64, 0x42F0_E1EB_A9EA_3693, 0, false, false, 0),
);

pub const CRC64_GO_ISO: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc64_go-iso", "CRC-64 (GO-ISO)", &["crc64_go", "crc-64_go-iso"], 64),
    CrcParams::new(64, 0x1B, u64::MAX, true, true, u64::MAX),
);

pub const CRC64_XZ: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc64_xz", "CRC-64 (XZ)", &["crc-64_xz", "crc64_go-ecma"], 64),
    CrcParams::new(64, 0x42F0_E1EB_A9EA_3693, u64::MAX, true, true, u64::MAX),
);

pub const CRC32_PHP: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc32_php", "CRC-32 (PHP hash)", &["crc-32_php"], 32),
    CrcParams::new(32, 0x04C1_1DB7, 0xFFFF_FFFF, false, false, 0xFFFF_FFFF),
)
.with_reversed_output();

pub const CRC32_UBI: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc32_ubi", "CRC-32 (UBI)", &["crc-32_jamcrc", "jamcrc"], 32),
    CrcParams::new(32, 0x04C1_1DB7, 0xFFFF_FFFF, true, true, 0),
);

/// CRC-32 frame check sequence in transmission order
pub const CRC32_FDDI: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc32_fddi", "CRC-32 (FDDI)", &["crc-32_fddi"], 32),
    CRC32_PARAMS,
)
.with_reversed_output();

pub const CRC32_MPEG2: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc32_mpeg2", "CRC-32 (MPEG-2)", &["crc-32_mpeg-2"], 32),
    CrcParams::new(32, 0x04C1_1DB7, 0xFFFF_FFFF, false, false, 0),
);

pub const CRC32_BZIP2: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc32_bzip2", "CRC-32 (BZIP2)", &["crc-32_bzip-2"], 32),
    CrcParams::new(32, 0x04C1_1DB7, 0xFFFF_FFFF, false, false, 0xFFFF_FFFF),
);

pub const CRC32C: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new(
        "crc32c",
        "CRC-32C (Castagnoli)",
        &["crc-32c", "crc32_castagnoli"],
        32,
    ),
    CrcParams::new(32, 0x1EDC_6F41, 0xFFFF_FFFF, true, true, 0xFFFF_FFFF),
);

pub const CRC24: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc24", "CRC-24 (OpenPGP)", &["crc-24", "crc24_openpgp"], 24),
    CrcParams::new(24, 0x86_4CFB, 0xB7_04CE, false, false, 0),
);

pub const CRC16: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc16", "CRC-16 (ARC)", &["crc-16", "crc16_arc"], 16),
    CrcParams::new(16, 0x8005, 0, true, true, 0),
);

pub const FCS16: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("fcs16", "FCS-16", &["fcs-16", "crc16_x25", "crc-16_x-25"], 16),
    CrcParams::new(16, 0x1021, 0xFFFF, true, true, 0xFFFF),
);

pub const CRC16_MINIX: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc16_minix", "CRC-16 (Minix crc)", &["crc-16_minix"], 16),
    CrcParams::new(16, 0x1021, 0, false, false, 0),
);

pub const CRC8: CrcSelector = CrcSelector::new(
    AlgorithmDescriptor::new("crc8", "CRC-8", &["crc-8", "crc8_smbus"], 8),
    CrcParams::new(8, 0x07, 0, false, false, 0),
);
