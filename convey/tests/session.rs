//! Client-side behavior: request shaping, middleware order, and the reply
//! path from a handler back through the API.

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use convey::client::{Bot, NextRequest, RawResponse, RequestMiddleware, RequestPayload, Session};
use convey::dispatcher::{Dispatcher, silent_call_request};
use convey::enums::RequestType;
use convey::errors::{ApiErrorKind, ClientError};
use convey::methods::{GetSubscriber, SendMessageLine, answer};
use convey::types::UpdateEvent;
use convey_core::{Propagation, handler_fn};

use common::{MockTransport, line_update, mock_bot};

#[tokio::test]
async fn send_message_line_shapes_a_post() {
    let transport = MockTransport::new([(200, r#"{"ok": true, "result": true}"#)]);
    let log = transport.log();
    let bot = mock_bot(transport);

    let line_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let sent = bot.send_message_line(line_id, user_id, "hi").await.unwrap();
    assert!(sent);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].request_type, RequestType::Post);
    assert_eq!(log[0].path, "/v1/line/send/message/");
    assert_eq!(log[0].data["text"], "hi");
    assert_eq!(log[0].data["line_id"], line_id.to_string());
}

#[tokio::test]
async fn path_parameters_stay_out_of_the_payload() {
    let transport = MockTransport::new([(
        200,
        r#"{"ok": true, "result": {
            "user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "name": "Ada", "surname": "Lovelace", "patronymic": "",
            "avatar_url": null, "avatar_small_url": null,
            "email": "ada@example.com", "post": "engineer", "phone": "+7"
        }}"#,
    )]);
    let log = transport.log();
    let bot = mock_bot(transport);

    let user_id: Uuid = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().unwrap();
    let user = bot.call(&GetSubscriber { user_id }, None).await.unwrap();
    assert_eq!(user.name, "Ada");

    let log = log.lock().unwrap();
    assert_eq!(log[0].request_type, RequestType::Get);
    assert_eq!(log[0].path, format!("/v1/line/subscriber/{user_id}/"));
    assert!(log[0].data.get("user_id").is_none(), "path parameter leaked into the payload");
}

#[tokio::test]
async fn error_statuses_classify_by_kind() {
    let transport = MockTransport::new([
        (404, r#"{"ok": false, "result": "not found"}"#),
        (503, r#"{"ok": false, "result": "server is restarting"}"#),
        (200, "{broken"),
    ]);
    let bot = mock_bot(transport);
    let line_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    match bot.send_message_line(line_id, user_id, "a").await.unwrap_err() {
        ClientError::Api(api) => {
            assert_eq!(api.kind, ApiErrorKind::NotFound);
            assert_eq!(api.message, "not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    match bot.send_message_line(line_id, user_id, "b").await.unwrap_err() {
        ClientError::Api(api) => assert_eq!(api.kind, ApiErrorKind::RestartingServer),
        other => panic!("expected Api error, got {other:?}"),
    }
    match bot.send_message_line(line_id, user_id, "c").await.unwrap_err() {
        ClientError::Decode { .. } => {}
        other => panic!("expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_success_body_reads_as_true() {
    let transport = MockTransport::new([(200, "")]);
    let bot = mock_bot(transport);
    assert!(bot.drop_keyboard(Uuid::new_v4(), Uuid::new_v4()).await.unwrap());
}

struct Tagger {
    tag: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl RequestMiddleware for Tagger {
    async fn handle(
        &self,
        bot: &Bot,
        payload: RequestPayload,
        next: NextRequest<'_>,
    ) -> Result<RawResponse, ClientError> {
        self.log.lock().unwrap().push(self.tag);
        next.run(bot, payload).await
    }
}

#[tokio::test]
async fn request_middleware_runs_outermost_first() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let transport = MockTransport::new([(200, r#"{"ok": true, "result": true}"#)]);
    let mut session = Session::new(transport);
    session.middleware(Tagger { tag: "outer", log: Arc::clone(&order) });
    session.middleware(Tagger { tag: "inner", log: Arc::clone(&order) });
    let bot = Bot::new("login", "password").with_session(session);

    bot.send_message_line(Uuid::new_v4(), Uuid::new_v4(), "hi").await.unwrap();
    assert_eq!(*order.lock().unwrap(), vec!["outer", "inner"]);
}

#[tokio::test]
async fn handler_reply_is_fired_back_through_the_bot() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.line.register(handler_fn(|event: UpdateEvent, _| async move {
        let UpdateEvent::Line(line) = event else {
            return Ok(Propagation::Skip);
        };
        Ok(answer(SendMessageLine::new(line.line_id, line.user_id, "pong")))
    }));

    let transport = MockTransport::new([(200, r#"{"ok": true, "result": true}"#)]);
    let log = transport.log();
    let bot = Arc::new(mock_bot(transport));

    let update = line_update(Uuid::new_v4(), Uuid::new_v4());
    let verdict = dispatcher.feed_update(Arc::clone(&bot), update).await.unwrap();
    let Propagation::Handled(response) = verdict else {
        panic!("expected a handled verdict");
    };
    let reply = response.downcast::<convey::methods::ReplyMethod>().unwrap();
    silent_call_request(&bot, reply).await.unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].path, "/v1/line/send/message/");
    assert_eq!(log[0].data["text"], "pong");
}

#[tokio::test]
async fn silent_call_swallows_api_errors_but_not_decode_errors() {
    let transport = MockTransport::new([(500, r#"{"ok": false, "result": "boom"}"#)]);
    let bot = mock_bot(transport);
    let reply = {
        let method = SendMessageLine::new(Uuid::new_v4(), Uuid::new_v4(), "x");
        convey::methods::ReplyMethod::new(method)
    };
    // server-side failure: logged and dropped
    silent_call_request(&bot, reply).await.unwrap();

    let transport = MockTransport::new([(200, "{broken")]);
    let bot = mock_bot(transport);
    let reply = convey::methods::ReplyMethod::new(SendMessageLine::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "x",
    ));
    // local decode bug: must surface
    assert!(matches!(
        silent_call_request(&bot, reply).await.unwrap_err(),
        ClientError::Decode { .. }
    ));
}
