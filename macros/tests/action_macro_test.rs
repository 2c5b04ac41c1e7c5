//! Tests for #[derive(Action)] macro

use storefront_core::action::Action as _;
use storefront_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum WishlistAction {
    #[command]
    #[action_type("[Wishlist] Load Wishlist")]
    LoadWishlist { user_id: String },

    #[event]
    #[action_type("[Wishlist] Load Wishlist Success")]
    LoadWishlistSuccess(Vec<String>),

    #[command]
    #[action_type("[Wishlist] Add Entry")]
    AddEntry { user_id: String, product_code: String },

    #[event]
    #[action_type("[Wishlist] Add Entry Fail")]
    AddEntryFail { status: u16 },

    #[action_type("[Wishlist] Reset")]
    Reset,

    Untyped,
}

#[test]
fn test_action_type_strings() {
    let load = WishlistAction::LoadWishlist {
        user_id: "current".to_string(),
    };
    assert_eq!(load.action_type(), "[Wishlist] Load Wishlist");
    assert_eq!(
        WishlistAction::LoadWishlistSuccess(vec![]).action_type(),
        "[Wishlist] Load Wishlist Success"
    );
    assert_eq!(WishlistAction::Reset.action_type(), "[Wishlist] Reset");
}

#[test]
fn test_action_type_defaults_to_variant_name() {
    assert_eq!(WishlistAction::Untyped.action_type(), "Untyped");
}

#[test]
fn test_is_command() {
    let action = WishlistAction::AddEntry {
        user_id: "current".to_string(),
        product_code: "300938".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
}

#[test]
fn test_is_event() {
    let action = WishlistAction::AddEntryFail { status: 400 };
    assert!(!action.is_command());
    assert!(action.is_event());
}

#[test]
fn test_unmarked_variants_are_neither() {
    for action in [WishlistAction::Reset, WishlistAction::Untyped] {
        assert!(!action.is_command(), "Should not be command: {action:?}");
        assert!(!action.is_event(), "Should not be event: {action:?}");
    }
}

#[test]
fn test_type_strings_unique() {
    let actions = [
        WishlistAction::LoadWishlist {
            user_id: "current".to_string(),
        },
        WishlistAction::LoadWishlistSuccess(vec!["300938".to_string()]),
        WishlistAction::AddEntry {
            user_id: "current".to_string(),
            product_code: "300938".to_string(),
        },
        WishlistAction::AddEntryFail { status: 500 },
        WishlistAction::Reset,
        WishlistAction::Untyped,
    ];

    let mut types: Vec<&str> = actions.iter().map(|action| action.action_type()).collect();
    types.sort_unstable();
    types.dedup();
    assert_eq!(types.len(), actions.len());
}
