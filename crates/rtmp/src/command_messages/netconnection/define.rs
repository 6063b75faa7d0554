use std::borrow::Cow;

/// The `NetConnection` method calls this publisher can issue.
#[derive(Debug, Clone)]
pub enum NetConnectionCommand<'a> {
    Connect {
        app: Cow<'a, str>,
        tc_url: Cow<'a, str>,
        flash_ver: Cow<'a, str>,
    },
    CreateStream,
}
