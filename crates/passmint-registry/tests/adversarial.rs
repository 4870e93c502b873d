//! Randomized adversarial operation sequences.
//!
//! A seeded RNG throws unordered calls from a pool of principals at a small
//! registry: mints with random payments, admin calls from random callers,
//! withdrawals through sinks that sometimes fail. A simple reference model
//! tracks what the registry should look like, and after every call the
//! registry must agree with it and pass its own invariant check.

use std::collections::HashMap;

use passmint_registry::{LedgerPayout, PassRegistry, PayoutSink};
use passmint_types::*;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;

/// Sink that fails on every `n`th call.
struct FlakyPayout {
    inner: LedgerPayout,
    calls: u64,
    fail_every: u64,
}

impl PayoutSink for FlakyPayout {
    fn send(&mut self, to: Address, amount: Decimal) -> Result<()> {
        self.calls += 1;
        if self.calls % self.fail_every == 0 {
            return Err(PassmintError::Io("payout rail unavailable".into()));
        }
        self.inner.send(to, amount)
    }
}

/// What the registry should look like.
#[derive(Default)]
struct Model {
    owner: Option<Address>,
    active: bool,
    issued: u64,
    holders: HashMap<Address, u64>,
    treasury: Decimal,
    paid_out: Decimal,
}

fn run(seed: u64, max_supply: u64, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let principals: Vec<Address> = (1..=6).map(Address::from_low_u64).collect();
    let price = Decimal::new(1, 1);

    let mut reg = PassRegistry::new(
        principals[0],
        RegistryConfig::new("Fuzz Pass", "ipfs://fuzz/").with_max_supply(max_supply),
    )
    .unwrap();
    let mut model = Model {
        owner: Some(principals[0]),
        ..Model::default()
    };
    let mut sink = FlakyPayout {
        inner: LedgerPayout::new(),
        calls: 0,
        fail_every: 3,
    };

    for step in 0..steps {
        let caller = principals[rng.gen_range(0..principals.len())];
        let is_owner = model.owner == Some(caller);

        match rng.gen_range(0..100) {
            0..=59 => {
                // Payment between 0.00 and 0.20.
                let payment = Decimal::new(rng.gen_range(0..=20), 2);
                let res = reg.mint_pass(caller, payment);
                if !model.active {
                    assert_eq!(res.unwrap_err().kind(), ErrorKind::State, "step {step}");
                } else if payment < price {
                    assert_eq!(
                        res.unwrap_err().kind(),
                        ErrorKind::InsufficientPayment,
                        "step {step}"
                    );
                } else if model.issued >= max_supply {
                    assert_eq!(
                        res.unwrap_err().kind(),
                        ErrorKind::CapacityExceeded,
                        "step {step}"
                    );
                } else {
                    model.issued += 1;
                    assert_eq!(res.unwrap(), TokenId(model.issued), "step {step}");
                    *model.holders.entry(caller).or_insert(0) += 1;
                    model.treasury += payment;
                }
            }
            60..=74 => {
                let res = reg.start_mint(&caller);
                if is_owner {
                    res.unwrap();
                    model.active = true;
                } else {
                    assert_eq!(res.unwrap_err().kind(), ErrorKind::Authorization);
                }
            }
            75..=89 => {
                let next_send_fails = (sink.calls + 1) % sink.fail_every == 0;
                let res = reg.withdraw(&caller, &mut sink);
                if !is_owner {
                    assert_eq!(res.unwrap_err().kind(), ErrorKind::Authorization);
                } else if model.treasury.is_zero() {
                    assert_eq!(res.unwrap(), Decimal::ZERO);
                } else if next_send_fails {
                    assert_eq!(res.unwrap_err().kind(), ErrorKind::Treasury);
                } else {
                    assert_eq!(res.unwrap(), model.treasury, "step {step}");
                    model.paid_out += model.treasury;
                    model.treasury = Decimal::ZERO;
                }
            }
            90..=97 => {
                let target = principals[rng.gen_range(0..principals.len())];
                let res = reg.transfer_ownership(&caller, target);
                if is_owner {
                    res.unwrap();
                    model.owner = Some(target);
                } else {
                    assert_eq!(res.unwrap_err().kind(), ErrorKind::Authorization);
                }
            }
            _ => {
                // Renouncing is rare; it ends all admin activity.
                let res = reg.renounce_ownership(&caller);
                if is_owner {
                    res.unwrap();
                    model.owner = None;
                } else {
                    assert_eq!(res.unwrap_err().kind(), ErrorKind::Authorization);
                }
            }
        }

        assert_eq!(reg.token_ids(), model.issued, "step {step}");
        assert_eq!(reg.treasury_balance(), model.treasury, "step {step}");
        assert_eq!(reg.owner(), model.owner, "step {step}");
        assert_eq!(reg.is_mint_active(), model.active, "step {step}");
        reg.verify_invariants()
            .unwrap_or_else(|e| panic!("step {step}: {e}"));
    }

    let sum: u64 = principals.iter().map(|p| reg.balance_of(p)).sum();
    assert_eq!(sum, reg.token_ids());
    for (holder, count) in &model.holders {
        assert_eq!(reg.balance_of(holder), *count);
    }
    assert_eq!(sink.inner.total_paid(), model.paid_out);
    assert!(reg.token_ids() <= max_supply);
}

#[test]
fn random_sequences_small_cap() {
    for seed in 0..20 {
        run(seed, 25, 600);
    }
}

#[test]
fn random_sequences_default_cap() {
    for seed in 100..104 {
        run(seed, 1000, 3000);
    }
}
