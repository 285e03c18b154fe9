//! End-to-end wallet flow: connect, earn, convert, reconnect.

use lemmi_wallet::{
    Balance, MockExtension, MockWalletAdapter, NoExtension, TokenAmount, WalletError,
    MIN_CONVERTIBLE_WINKS,
};

#[test]
fn test_earn_and_convert_in_steps() {
    let mut wallet = MockWalletAdapter::new();
    wallet
        .connect(
            &MockExtension::new(3)
                .with_ada(TokenAmount::from_whole(25))
                .with_gerbil_nft(true),
        )
        .unwrap();
    assert!(wallet.wallet().unwrap().has_gerbil_nft);
    assert_eq!(wallet.get_balance().unwrap().ada, TokenAmount::from_whole(25));

    // 37 coins at 10 WINKS each
    for _ in 0..37 {
        wallet.credit_winks(TokenAmount::from_whole(10)).unwrap();
    }
    assert_eq!(wallet.get_balance().unwrap().winks, TokenAmount::from_whole(370));

    // Not a whole LEMMI, but a whole number of steps
    let conversion = wallet.convert(TokenAmount::from_whole(370)).unwrap();
    assert_eq!(conversion.lemmi_received, TokenAmount::from_parts(0, 370_000));
    assert!(conversion.balance.winks.is_zero());
}

#[test]
fn test_fractional_step_rejected_without_side_effects() {
    let mut wallet = MockWalletAdapter::new();
    wallet.connect(&MockExtension::new(4)).unwrap();
    wallet.credit_winks(TokenAmount::from_whole(5)).unwrap();

    let before = wallet.get_balance().unwrap();
    let odd = TokenAmount::from_raw(MIN_CONVERTIBLE_WINKS.raw() + 1);
    let err = wallet.convert(odd).unwrap_err();
    assert!(matches!(err, WalletError::InvalidAmount(_)));
    assert!(!err.user_message().is_empty());
    assert_eq!(wallet.get_balance().unwrap(), before);
}

#[test]
fn test_every_error_has_a_message() {
    let errors = [
        WalletError::ExtensionNotFound,
        WalletError::NotConnected,
        WalletError::InsufficientBalance {
            needed: TokenAmount::ONE,
            available: TokenAmount::ZERO,
        },
        WalletError::InvalidAmount(TokenAmount::ZERO),
        WalletError::ArithmeticOverflow,
    ];
    for err in errors {
        assert!(!err.user_message().is_empty(), "{err:?}");
    }
}

#[test]
fn test_missing_extension_then_mock() {
    let mut wallet = MockWalletAdapter::new();
    let err = wallet.connect(&NoExtension).map(|_| ()).unwrap_err();
    assert!(err.user_message().contains("not found"));

    wallet.connect(&MockExtension::new(5)).unwrap();
    assert!(wallet.is_connected());
}

#[test]
fn test_balance_json_shape() {
    let balance = Balance {
        ada: TokenAmount::ONE,
        winks: TokenAmount::ZERO,
        lemmi: TokenAmount::from_raw(7),
    };
    let json = serde_json::to_value(balance).unwrap();
    assert_eq!(json["ada"], 1_000_000);
    assert_eq!(json["lemmi"], 7);
}
