//! View components rendered with askama.
//!
//! Components are plain view-model structs derived from cart snapshots.
//! Route handlers build them and return them as responses; they never touch
//! the cart store themselves.

pub mod cart_row;
pub mod cart_sidebar;

pub use cart_row::{CartRowView, RowActions, RowKind};
pub use cart_sidebar::{
    CartFooter, CartSidebar, CartSidebarProps, ContentState, SIDEBAR_TARGET, SidebarActions,
};
