//! Platform fee calculation.
//!
//! The stored `amount` of an order is the base price only. The platform fee
//! and the total a customer pays are derived from it on read, at the
//! percentage configured for the order's delivery type.

use pressline_config::FeeConfig;
use pressline_types::{DeliveryType, Order};
use rust_decimal::prelude::*;
use serde::Serialize;

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Price lines shown to a customer for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
	pub amount: Decimal,
	pub fee_percent: u32,
	pub platform_fee: Decimal,
	pub total_payable: Decimal,
}

/// Fee schedule of a marketplace.
#[derive(Debug, Clone)]
pub struct Pricing {
	standard_percent: u32,
	express_percent: u32,
}

impl Pricing {
	pub fn new(fees: &FeeConfig) -> Self {
		Self {
			standard_percent: fees.standard_percent,
			express_percent: fees.express_percent,
		}
	}

	pub fn fee_percent(&self, delivery_type: DeliveryType) -> u32 {
		match delivery_type {
			DeliveryType::Standard => self.standard_percent,
			DeliveryType::Express => self.express_percent,
		}
	}

	pub fn breakdown(&self, order: &Order) -> PriceBreakdown {
		let fee_percent = self.fee_percent(order.delivery_type);
		let amount = Decimal::from(order.amount);
		let platform_fee = (amount * Decimal::from(fee_percent) / Decimal::ONE_HUNDRED)
			.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

		PriceBreakdown {
			amount,
			fee_percent,
			platform_fee,
			total_payable: amount + platform_fee,
		}
	}
}

impl Default for Pricing {
	fn default() -> Self {
		Self::new(&FeeConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::seed;

	#[test]
	fn test_standard_and_express_fees() {
		let pricing = Pricing::default();
		let mut order = seed::demo_orders(15).remove(0);
		assert_eq!(order.amount, 180);

		let standard = pricing.breakdown(&order);
		assert_eq!(standard.fee_percent, 12);
		assert_eq!(standard.platform_fee, Decimal::new(2160, 2));
		assert_eq!(standard.total_payable, Decimal::new(20160, 2));

		order.delivery_type = DeliveryType::Express;
		let express = pricing.breakdown(&order);
		assert_eq!(express.platform_fee, Decimal::new(4320, 2));
		assert_eq!(express.amount, standard.amount);
	}

	#[test]
	fn test_zero_fee() {
		let pricing = Pricing::new(&FeeConfig {
			standard_percent: 0,
			express_percent: 24,
		});
		let order = seed::demo_orders(15).remove(1);
		let breakdown = pricing.breakdown(&order);
		assert_eq!(breakdown.platform_fee, Decimal::ZERO);
		assert_eq!(breakdown.total_payable, Decimal::from(120));
	}
}
