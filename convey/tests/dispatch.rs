//! End-to-end dispatch behavior: filters, router nesting, error handling.

mod common;

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use convey::dispatcher::user_context::{EVENT_LINE_ID, EVENT_USER_ID};
use convey::dispatcher::{Dispatcher, Router};
use convey::enums::UpdateType;
use convey::types::{ErrorEvent, UpdateEvent};
use convey_core::{
    BoxError, Context, ContextData, FilterResult, Propagation, filter_fn, handler_fn,
};

use common::{empty_update, line_update, mock_bot};

fn inject(key: &'static str, value: u32) -> FilterResult {
    let mut patch = ContextData::new();
    patch.insert(key.into(), Arc::new(value));
    FilterResult::AcceptWith(patch)
}

#[tokio::test]
async fn filter_injection_flows_into_the_handler() {
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .line
        .register(handler_fn(|_: UpdateEvent, ctx: Context| async move {
            let foo = *ctx.get::<u32>("foo").ok_or("foo missing")?;
            Ok(Propagation::handled(foo))
        }))
        .filter(filter_fn(|_: UpdateEvent, _| async { Ok::<_, BoxError>(inject("foo", 1)) }))
        .filter(filter_fn(|_: UpdateEvent, ctx: Context| async move {
            Ok::<_, BoxError>(ctx.get::<u32>("foo") == Some(&1))
        }));

    let bot = Arc::new(mock_bot(common::MockTransport::new([])));
    let update = line_update(Uuid::new_v4(), Uuid::new_v4());
    match dispatcher.feed_update(bot, update).await.unwrap() {
        Propagation::Handled(response) => assert_eq!(response.downcast::<u32>().unwrap(), 1),
        other => panic!("expected Handled, got {other:?}"),
    }
}

#[tokio::test]
async fn user_context_ids_are_visible_to_handlers() {
    let line_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let mut dispatcher = Dispatcher::new();
    dispatcher.line.register(handler_fn(move |_: UpdateEvent, ctx: Context| async move {
        assert_eq!(ctx.get::<Uuid>(EVENT_LINE_ID), Some(&line_id));
        assert_eq!(ctx.get::<Uuid>(EVENT_USER_ID), Some(&user_id));
        Ok(Propagation::finish())
    }));

    let bot = Arc::new(mock_bot(common::MockTransport::new([])));
    let verdict = dispatcher.feed_update(bot, line_update(line_id, user_id)).await.unwrap();
    assert!(matches!(verdict, Propagation::Handled(_)));
}

#[tokio::test]
async fn unclassifiable_update_is_dropped_without_error() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.line.register(handler_fn(|_: UpdateEvent, _| async {
        panic!("handler must not run for an unclassifiable update")
    }));

    let bot = Arc::new(mock_bot(common::MockTransport::new([])));
    let verdict = dispatcher.feed_update(bot, empty_update()).await.unwrap();
    assert!(!matches!(verdict, Propagation::Handled(_)));
}

#[tokio::test]
async fn unhandled_event_falls_through_to_child_router() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::builder().name("root").build();
    let parent_order = Arc::clone(&order);
    dispatcher.line.register(handler_fn(move |_: UpdateEvent, _| {
        let order = Arc::clone(&parent_order);
        async move {
            order.lock().unwrap().push("root");
            Ok(Propagation::Skip)
        }
    }));

    let mut child = Router::new("child");
    let child_order = Arc::clone(&order);
    child.line.register(handler_fn(move |_: UpdateEvent, _| {
        let order = Arc::clone(&child_order);
        async move {
            order.lock().unwrap().push("child");
            Ok(Propagation::finish())
        }
    }));
    dispatcher.include_router(child);

    let bot = Arc::new(mock_bot(common::MockTransport::new([])));
    let update = line_update(Uuid::new_v4(), Uuid::new_v4());
    let verdict = dispatcher.feed_update(bot, update).await.unwrap();
    assert!(matches!(verdict, Propagation::Handled(_)));
    assert_eq!(*order.lock().unwrap(), vec!["root", "child"]);
}

#[tokio::test]
async fn root_filter_rejection_fences_off_the_subtree() {
    let mut dispatcher = Dispatcher::new();

    let mut child = Router::new("fenced");
    child.line.filter(filter_fn(|_: UpdateEvent, _| async { Ok::<_, BoxError>(false) }));
    child.line.register(handler_fn(|_: UpdateEvent, _| async {
        panic!("fenced handler must not run")
    }));

    let mut grandchild = Router::new("inner");
    grandchild.line.register(handler_fn(|_: UpdateEvent, _| async {
        panic!("handlers below a rejecting root filter must not run")
    }));
    child.include_router(grandchild);
    dispatcher.include_router(child);

    let bot = Arc::new(mock_bot(common::MockTransport::new([])));
    let update = line_update(Uuid::new_v4(), Uuid::new_v4());
    let verdict = dispatcher.feed_update(bot, update).await.unwrap();
    assert!(!matches!(verdict, Propagation::Handled(_)));
}

#[tokio::test]
async fn used_update_types_cover_the_whole_tree() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.line.register(handler_fn(|_: UpdateEvent, _| async { Ok(Propagation::finish()) }));

    let mut child = Router::new("child");
    child
        .subscriber
        .register(handler_fn(|_: UpdateEvent, _| async { Ok(Propagation::finish()) }));
    dispatcher.include_router(child);

    let used = dispatcher.resolve_used_update_types();
    assert!(used.contains(&UpdateType::Line));
    assert!(used.contains(&UpdateType::Subscriber));
    assert!(!used.contains(&UpdateType::Competence));
}

#[tokio::test]
async fn error_observer_claims_a_failing_handler() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.line.register(handler_fn(|_: UpdateEvent, _| async {
        Err::<Propagation, BoxError>("handler exploded".into())
    }));
    dispatcher.errors.register(handler_fn(|event: ErrorEvent, _| async move {
        assert!(event.error.to_string().contains("handler exploded"));
        assert!(event.update.is_some());
        Ok(Propagation::handled("recovered"))
    }));

    let bot = Arc::new(mock_bot(common::MockTransport::new([])));
    let update = line_update(Uuid::new_v4(), Uuid::new_v4());
    match dispatcher.feed_update(bot, update).await.unwrap() {
        Propagation::Handled(response) => {
            assert_eq!(response.downcast::<&str>().unwrap(), "recovered")
        }
        other => panic!("expected Handled, got {other:?}"),
    }
}

#[tokio::test]
async fn unclaimed_pipeline_error_is_reraised() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.line.register(handler_fn(|_: UpdateEvent, _| async {
        Err::<Propagation, BoxError>("nobody catches this".into())
    }));

    let bot = Arc::new(mock_bot(common::MockTransport::new([])));
    let update = line_update(Uuid::new_v4(), Uuid::new_v4());
    let err = dispatcher.feed_update(bot, update).await.unwrap_err();
    assert!(err.to_string().contains("nobody catches this"));
}

#[tokio::test]
async fn raw_update_decodes_and_dispatches() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.subscriber.register(handler_fn(|event: UpdateEvent, _| async move {
        let UpdateEvent::Subscriber(subscriber) = event else {
            return Ok(Propagation::Skip);
        };
        assert_eq!(subscriber.action, "add");
        Ok(Propagation::finish())
    }));

    let bot = Arc::new(mock_bot(common::MockTransport::new([])));
    let verdict =
        dispatcher.feed_raw_update(bot, common::subscriber_update_json()).await.unwrap();
    assert!(matches!(verdict, Propagation::Handled(_)));
}

#[tokio::test]
async fn lifecycle_observers_run_over_the_tree() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = Dispatcher::new();
    let root_log = Arc::clone(&log);
    dispatcher.startup.register(convey_core::lifecycle_fn(move |_| {
        let log = Arc::clone(&root_log);
        async move {
            log.lock().unwrap().push("root");
            Ok(())
        }
    }));

    let mut child = Router::new("child");
    let child_log = Arc::clone(&log);
    child.startup.register(convey_core::lifecycle_fn(move |_| {
        let log = Arc::clone(&child_log);
        async move {
            log.lock().unwrap().push("child");
            Ok(())
        }
    }));
    dispatcher.include_router(child);

    dispatcher.emit_startup().await.unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["root", "child"]);
}
