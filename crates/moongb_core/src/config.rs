use typed_builder::TypedBuilder;

/// DMG frame length in T-cycles (154 lines of 456 dots).
pub const DEFAULT_CYCLES_PER_FRAME: u32 = 70_224;

/// Where the half-carry and carry flags of the 8-bit ALU are derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CarrySource {
    /// From the operands before the operation, as the hardware does.
    #[default]
    Operands,
    /// Legacy order, kept for replaying traces recorded against earlier
    /// builds. The register and `(HL)` ALU forms and `INC`/`DEC r` take H
    /// and C from the updated value and `operand + carry`. The immediate
    /// forms take them from A and `operand + carry` wrapped to 8 bits.
    PostResult,
}

/// Flag-computation details that differ between reference tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct FlagQuirks {
    #[builder(default)]
    pub carry_source: CarrySource,
    /// Whether AND/OR/XOR set the subtract flag.
    #[builder(default = true)]
    pub logic_sets_subtract: bool,
}

impl Default for FlagQuirks {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Options supplied to [`crate::GameBoy`] at construction time.
///
/// ```
/// use moongb_core::{CarrySource, CoreConfig, FlagQuirks};
///
/// let config = CoreConfig::builder()
///     .flags(FlagQuirks::builder().carry_source(CarrySource::PostResult).build())
///     .build();
/// assert_eq!(config.cycles_per_frame, 70_224);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct CoreConfig {
    #[builder(default)]
    pub flags: FlagQuirks,
    #[builder(default = DEFAULT_CYCLES_PER_FRAME)]
    pub cycles_per_frame: u32,
    /// Start from the post-boot-ROM register and IO state instead of zeros.
    #[builder(default = true)]
    pub emulate_boot_state: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
