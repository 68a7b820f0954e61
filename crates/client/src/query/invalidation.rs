//! Which cached queries a successful mutation makes stale.
//!
//! The whole dependency graph lives in [`INVALIDATION_TABLE`]; services never
//! decide on their own what to invalidate.

use super::key::{KeyPrefix, Operation, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub const ALL: [MutationKind; 3] = [MutationKind::Create, MutationKind::Update, MutationKind::Delete];

    pub fn past_tense(&self) -> &'static str {
        match self {
            MutationKind::Create => "created",
            MutationKind::Update => "updated",
            MutationKind::Delete => "deleted",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InvalidationRule {
    pub resource: Resource,
    pub kinds: &'static [MutationKind],
    pub affects: &'static [KeyPrefix],
}

const ANY: &[MutationKind] = &MutationKind::ALL;

const fn own(resource: Resource) -> [KeyPrefix; 2] {
    [KeyPrefix::list(resource), KeyPrefix::detail(resource)]
}

const BRANCH: [KeyPrefix; 2] = own(Resource::Branch);
const USER: [KeyPrefix; 2] = own(Resource::User);
const ITEM: [KeyPrefix; 2] = own(Resource::Item);
const MEMBER: [KeyPrefix; 2] = own(Resource::Member);
const SUPPLIER: [KeyPrefix; 2] = own(Resource::Supplier);
const UNIT: [KeyPrefix; 2] = own(Resource::Unit);
const CATEGORY: [KeyPrefix; 2] = own(Resource::Category);
const CASH_FLOW: [KeyPrefix; 2] = own(Resource::CashFlow);
const STOCK_TRANSFER: [KeyPrefix; 2] = own(Resource::StockTransfer);
const SELL_RETURN: [KeyPrefix; 2] = own(Resource::SellReturn);
const STOCK_ADJUSTMENT: [KeyPrefix; 2] = own(Resource::StockAdjustment);

const FRONT_STOCK_LIST: KeyPrefix = KeyPrefix::list(Resource::FrontStockItem);
const OVERVIEW: KeyPrefix = KeyPrefix::new(Resource::Overview, Operation::Summary);
const PROFILE: KeyPrefix = KeyPrefix::detail(Resource::Profile);
// Labels print item name, code, price and unit name.
const LABELS: KeyPrefix = KeyPrefix::new(Resource::Label, Operation::Report);

pub static INVALIDATION_TABLE: &[InvalidationRule] = &[
    InvalidationRule {
        resource: Resource::Branch,
        kinds: ANY,
        affects: &BRANCH,
    },
    InvalidationRule {
        resource: Resource::User,
        kinds: ANY,
        affects: &[USER[0], USER[1], PROFILE],
    },
    InvalidationRule {
        resource: Resource::Item,
        kinds: ANY,
        affects: &[ITEM[0], ITEM[1], FRONT_STOCK_LIST, OVERVIEW, LABELS],
    },
    InvalidationRule {
        resource: Resource::Member,
        kinds: ANY,
        affects: &MEMBER,
    },
    InvalidationRule {
        resource: Resource::Supplier,
        kinds: ANY,
        affects: &SUPPLIER,
    },
    InvalidationRule {
        resource: Resource::Unit,
        kinds: ANY,
        affects: &[UNIT[0], UNIT[1], ITEM[0], ITEM[1], LABELS],
    },
    InvalidationRule {
        resource: Resource::Category,
        kinds: ANY,
        affects: &[CATEGORY[0], CATEGORY[1], ITEM[0], ITEM[1]],
    },
    InvalidationRule {
        resource: Resource::CashFlow,
        kinds: ANY,
        affects: &[CASH_FLOW[0], CASH_FLOW[1], OVERVIEW],
    },
    InvalidationRule {
        resource: Resource::StockTransfer,
        kinds: ANY,
        affects: &[STOCK_TRANSFER[0], STOCK_TRANSFER[1], ITEM[0], ITEM[1], FRONT_STOCK_LIST],
    },
    InvalidationRule {
        resource: Resource::SellReturn,
        kinds: ANY,
        affects: &[
            SELL_RETURN[0],
            SELL_RETURN[1],
            ITEM[0],
            ITEM[1],
            FRONT_STOCK_LIST,
            CASH_FLOW[0],
            OVERVIEW,
        ],
    },
    InvalidationRule {
        resource: Resource::StockAdjustment,
        kinds: ANY,
        affects: &[STOCK_ADJUSTMENT[0], STOCK_ADJUSTMENT[1], ITEM[0], ITEM[1], FRONT_STOCK_LIST],
    },
];

/// Prefixes to invalidate after a successful `kind` mutation of `resource`.
///
/// Empty for read-only resources.
pub fn affected_keys(resource: Resource, kind: MutationKind) -> Vec<KeyPrefix> {
    let mut out: Vec<KeyPrefix> = Vec::new();
    for rule in INVALIDATION_TABLE
        .iter()
        .filter(|r| r.resource == resource && r.kinds.contains(&kind))
    {
        for prefix in rule.affects {
            if !out.contains(prefix) {
                out.push(*prefix);
            }
        }
    }
    out
}

/// Resources that accept create/update/delete.
pub fn is_mutable(resource: Resource) -> bool {
    INVALIDATION_TABLE.iter().any(|r| r.resource == resource)
}
