//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when wrapping connector calls into
//! `Effect` variants inside reducers.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use storefront_core::async_effect;
///
/// async_effect! {
///     match connector.load(&user_id, &cart_id).await {
///         Ok(cart) => Some(CartAction::LoadCartSuccess { cart_id, cart }),
///         Err(error) => Some(CartAction::LoadCartFail { cart_id, error: normalize_http_error(&error) }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Stream` from a generator body using `yield`
///
/// Every yielded action is dispatched back into the store, in order.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_core::stream_effect;
///
/// stream_effect! {
///     if let Ok(list) = connector.get_list(&user_id, &params).await {
///         let (values, page) = normalize_list_page(list, |a| a.code.clone()).into_ordered_parts();
///         yield OrderApprovalAction::LoadOrderApprovalSuccess(values);
///         yield OrderApprovalAction::LoadOrderApprovalsSuccess { page, params };
///     }
/// }
/// ```
#[macro_export]
macro_rules! stream_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Stream(
            ::std::boxed::Box::pin($crate::async_stream::stream! { $($body)* })
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;
    use futures::StreamExt;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Loaded { value: i32 },
        Reloaded,
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            Some(TestAction::Loaded { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn test_stream_effect_macro_yields_in_order() {
        let effect = stream_effect! {
            yield TestAction::Loaded { value: 1 };
            yield TestAction::Reloaded;
        };

        let Effect::Stream(stream) = effect else {
            unreachable!("stream_effect! builds Effect::Stream");
        };
        let actions: Vec<TestAction> = tokio_test::block_on(stream.collect());
        assert_eq!(
            actions,
            vec![TestAction::Loaded { value: 1 }, TestAction::Reloaded]
        );
    }
}
