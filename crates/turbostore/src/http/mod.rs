//! HTTP layer: provider abstraction, request/response types and the dispatcher

mod dispatcher;
mod openai_provider;
mod provider;
mod request;
mod response;

pub use dispatcher::{Dispatcher, RequestOptions};
pub use openai_provider::{
    ORGANIZATION_HEADER, OpenAIHttpProvider, OpenAIHttpProviderBuilder, PROJECT_HEADER,
};
pub use provider::HttpProvider;
pub use request::Request;
pub use response::Response;

pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
