use std::borrow::Cow;

/// The `NetStream` method calls this publisher can issue once a stream id has been
/// created by `createStream`.
#[derive(Debug, Clone)]
pub enum NetStreamCommand<'a> {
    Publish {
        stream_name: Cow<'a, str>,
        publish_type: Cow<'a, str>,
    },
    FcUnpublish {
        stream_name: Cow<'a, str>,
    },
    DeleteStream {
        stream_id: f64,
    },
    CloseStream,
}
