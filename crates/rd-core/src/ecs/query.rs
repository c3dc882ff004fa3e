//! Multi-component intersection queries

use super::component::{Component, ComponentKind};
use super::entity::EntityId;
use super::store::{ColumnsMut, ComponentStore};

/// A set of component types fetched together for one entity
///
/// Implemented for `()` (matches nothing) and for tuples of one to four
/// [`Component`] types, yielding a tuple of shared references into the store.
pub trait Query {
    type Item<'w>;

    /// Kinds that must all be present
    const KINDS: &'static [ComponentKind];

    fn fetch(store: &ComponentStore, entity: EntityId) -> Option<Self::Item<'_>>;
}

impl Query for () {
    type Item<'w> = ();

    const KINDS: &'static [ComponentKind] = &[];

    fn fetch(_store: &ComponentStore, _entity: EntityId) -> Option<Self::Item<'_>> {
        None
    }
}

macro_rules! impl_query {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Query for ($($name,)+) {
            type Item<'w> = ($(&'w $name,)+);

            const KINDS: &'static [ComponentKind] = &[$($name::KIND),+];

            fn fetch(store: &ComponentStore, entity: EntityId) -> Option<Self::Item<'_>> {
                Some(($($name::column(store).get(entity)?,)+))
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);

/// A set of component types borrowed mutably together for one entity
///
/// Implemented for tuples of one to four distinct [`Component`] types. Each
/// type claims its own column from [`ColumnsMut`], so the borrows are
/// disjoint; a tuple naming the same type twice matches nothing.
pub trait QueryMut {
    type Item<'c>;

    /// Kinds that must all be present
    const KINDS: &'static [ComponentKind];

    /// Call `f` with the components of every listed entity that has them all
    fn for_each<F>(store: &mut ComponentStore, entities: &[EntityId], f: F)
    where
        F: FnMut(EntityId, Self::Item<'_>);
}

macro_rules! impl_query_mut {
    ($($name:ident $col:ident),+) => {
        impl<$($name: Component),+> QueryMut for ($($name,)+) {
            type Item<'c> = ($(&'c mut $name,)+);

            const KINDS: &'static [ComponentKind] = &[$($name::KIND),+];

            fn for_each<F>(store: &mut ComponentStore, entities: &[EntityId], mut f: F)
            where
                F: FnMut(EntityId, Self::Item<'_>),
            {
                let mut columns: ColumnsMut<'_> = store.columns_mut();
                $(
                    let Some($col) = $name::take_column(&mut columns) else {
                        return;
                    };
                )+
                for &entity in entities {
                    if let ($(Some($col),)+) = ($($col.get_mut(entity),)+) {
                        f(entity, ($($col,)+));
                    }
                }
            }
        }
    };
}

impl_query_mut!(A a);
impl_query_mut!(A a, B b);
impl_query_mut!(A a, B b, C c);
impl_query_mut!(A a, B b, C c, D d);

/// Candidate entities for `kinds`: the members of the smallest column
pub(crate) fn candidates(store: &ComponentStore, kinds: &[ComponentKind]) -> Vec<EntityId> {
    kinds
        .iter()
        .min_by_key(|kind| store.len_of(**kind))
        .map(|kind| store.entities_of(*kind))
        .unwrap_or_default()
}
