//! Resource descriptors: REST path, key resource and wire types.

use retailops_accounting::{CashFlow, CashFlowFilter, CreateCashFlow, UpdateCashFlow};
use retailops_auth::{CreateUser, UpdateUser, User, UserFilter};
use retailops_core::{
    Branch, BranchFilter, BranchId, CashFlowId, CategoryId, CreateBranch, ItemId, MemberId,
    SellReturnId, StockAdjustmentId, StockTransferId, SupplierId, UnitId, UpdateBranch, UserId,
};
use retailops_inventory::{
    Category, CategoryFilter, CreateCategory, CreateItem, CreateStockAdjustment,
    CreateStockTransfer, CreateUnit, FrontStockFilter, FrontStockItem, Item, ItemFilter,
    StockAdjustment, StockAdjustmentFilter, StockTransfer, StockTransferFilter, Unit, UnitFilter,
    UpdateCategory, UpdateItem, UpdateStockAdjustment, UpdateStockTransfer, UpdateUnit,
};
use retailops_parties::{
    CreateMember, CreateSupplier, Member, MemberFilter, Supplier, SupplierFilter, UpdateMember,
    UpdateSupplier,
};
use retailops_sales::{CreateSellReturn, SellReturn, SellReturnFilter, UpdateSellReturn};

use super::{MutableResource, ResourceSpec};
use crate::query::Resource;

macro_rules! resource {
    (
        $(#[$meta:meta])*
        $name:ident {
            resource: $resource:expr,
            path: $path:literal,
            branch_scoped: $scoped:literal,
            id: $id:ty,
            entity: $entity:ty,
            filter: $filter:ty,
            $(create: $create:ty, update: $update:ty,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl ResourceSpec for $name {
            const RESOURCE: Resource = $resource;
            const PATH: &'static str = $path;
            const BRANCH_SCOPED: bool = $scoped;

            type Id = $id;
            type Entity = $entity;
            type Filter = $filter;
        }

        $(
            impl MutableResource for $name {
                type Create = $create;
                type Update = $update;
            }
        )?
    };
}

resource!(Branches {
    resource: Resource::Branch,
    path: "/branches",
    branch_scoped: false,
    id: BranchId,
    entity: Branch,
    filter: BranchFilter,
    create: CreateBranch,
    update: UpdateBranch,
});

resource!(Users {
    resource: Resource::User,
    path: "/users",
    branch_scoped: false,
    id: UserId,
    entity: User,
    filter: UserFilter,
    create: CreateUser,
    update: UpdateUser,
});

resource!(Items {
    resource: Resource::Item,
    path: "/items",
    branch_scoped: true,
    id: ItemId,
    entity: Item,
    filter: ItemFilter,
    create: CreateItem,
    update: UpdateItem,
});

resource!(
    /// Sellable stock on the shop floor. Read-only.
    FrontStock {
        resource: Resource::FrontStockItem,
        path: "/items/front-stock",
        branch_scoped: true,
        id: ItemId,
        entity: FrontStockItem,
        filter: FrontStockFilter,
    }
);

resource!(Members {
    resource: Resource::Member,
    path: "/members",
    branch_scoped: false,
    id: MemberId,
    entity: Member,
    filter: MemberFilter,
    create: CreateMember,
    update: UpdateMember,
});

resource!(Suppliers {
    resource: Resource::Supplier,
    path: "/suppliers",
    branch_scoped: false,
    id: SupplierId,
    entity: Supplier,
    filter: SupplierFilter,
    create: CreateSupplier,
    update: UpdateSupplier,
});

resource!(Units {
    resource: Resource::Unit,
    path: "/units",
    branch_scoped: false,
    id: UnitId,
    entity: Unit,
    filter: UnitFilter,
    create: CreateUnit,
    update: UpdateUnit,
});

resource!(Categories {
    resource: Resource::Category,
    path: "/categories",
    branch_scoped: false,
    id: CategoryId,
    entity: Category,
    filter: CategoryFilter,
    create: CreateCategory,
    update: UpdateCategory,
});

resource!(CashFlows {
    resource: Resource::CashFlow,
    path: "/cash-flows",
    branch_scoped: true,
    id: CashFlowId,
    entity: CashFlow,
    filter: CashFlowFilter,
    create: CreateCashFlow,
    update: UpdateCashFlow,
});

resource!(StockTransfers {
    resource: Resource::StockTransfer,
    path: "/stock-transfers",
    branch_scoped: true,
    id: StockTransferId,
    entity: StockTransfer,
    filter: StockTransferFilter,
    create: CreateStockTransfer,
    update: UpdateStockTransfer,
});

resource!(SellReturns {
    resource: Resource::SellReturn,
    path: "/sell-returns",
    branch_scoped: true,
    id: SellReturnId,
    entity: SellReturn,
    filter: SellReturnFilter,
    create: CreateSellReturn,
    update: UpdateSellReturn,
});

resource!(StockAdjustments {
    resource: Resource::StockAdjustment,
    path: "/stock-adjustments",
    branch_scoped: true,
    id: StockAdjustmentId,
    entity: StockAdjustment,
    filter: StockAdjustmentFilter,
    create: CreateStockAdjustment,
    update: UpdateStockAdjustment,
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::invalidation::is_mutable;

    fn check<R: ResourceSpec>(mutable: bool) {
        assert_eq!(is_mutable(R::RESOURCE), mutable, "{:?}", R::RESOURCE);
        assert!(R::PATH.starts_with('/'));
    }

    #[test]
    fn descriptors_agree_with_the_invalidation_table() {
        check::<Branches>(true);
        check::<Users>(true);
        check::<Items>(true);
        check::<FrontStock>(false);
        check::<Members>(true);
        check::<Suppliers>(true);
        check::<Units>(true);
        check::<Categories>(true);
        check::<CashFlows>(true);
        check::<StockTransfers>(true);
        check::<SellReturns>(true);
        check::<StockAdjustments>(true);
    }

    fn with_detail<R: MutableResource>() -> Resource {
        R::RESOURCE
    }

    #[test]
    fn only_mutable_descriptors_offer_detail_lookups() {
        let detailed = [
            with_detail::<Branches>(),
            with_detail::<Users>(),
            with_detail::<Items>(),
            with_detail::<Members>(),
            with_detail::<Suppliers>(),
            with_detail::<Units>(),
            with_detail::<Categories>(),
            with_detail::<CashFlows>(),
            with_detail::<StockTransfers>(),
            with_detail::<SellReturns>(),
            with_detail::<StockAdjustments>(),
        ];
        assert!(detailed.iter().all(|r| is_mutable(*r)));
        assert!(!detailed.contains(&FrontStock::RESOURCE));
    }

    #[test]
    fn branch_scoping() {
        assert!(Items::BRANCH_SCOPED);
        assert!(FrontStock::BRANCH_SCOPED);
        assert!(CashFlows::BRANCH_SCOPED);
        assert!(StockTransfers::BRANCH_SCOPED);
        assert!(SellReturns::BRANCH_SCOPED);
        assert!(StockAdjustments::BRANCH_SCOPED);
        assert!(!Branches::BRANCH_SCOPED);
        assert!(!Members::BRANCH_SCOPED);
        assert!(!Units::BRANCH_SCOPED);
    }
}
