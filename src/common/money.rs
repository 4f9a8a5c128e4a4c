// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

/// Casas decimais de todo valor monetário agregado.
pub const MONEY_SCALE: u32 = 2;

/// Arredonda um valor monetário já agregado para 2 casas,
/// com empate (x.xx5) afastando do zero.
///
/// Deve ser aplicado uma única vez, sobre o resultado final do SUM,
/// nunca linha a linha.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
