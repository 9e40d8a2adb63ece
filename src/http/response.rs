use super::{link, Error};
use reqwest::{header::LINK, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

pub struct Json;

/// Marker for responses whose body is ignored, e.g. `204 No Content`.
pub struct Empty;

pub trait ResponseType {}

impl ResponseType for Json {}
impl ResponseType for Empty {}

pub enum Response<ResponseType, T> {
    Success(Inner<ResponseType, T>),
    Error(ErrorResponse),
    Failure(Error),
}

pub struct Inner<ResponseType, T> {
    marker: PhantomData<ResponseType>,
    pub payload: T,
    pub link: Option<String>,
}

impl<S, T> Response<S, T>
where
    S: ResponseType,
{
    pub fn is_not_found(&self) -> bool {
        matches!(self, Response::Error(response) if response.status == StatusCode::NOT_FOUND.as_u16())
    }

    pub fn collect(self) -> Result<T, Error> {
        self.collect_page().map(|(payload, _)| payload)
    }

    /// Returns the payload along with the page number of the `next` link, if any.
    pub fn collect_page(self) -> Result<(T, Option<u32>), Error> {
        match self {
            Response::Success(response) => {
                let next_page = link::next_page(response.link.as_deref());
                Ok((response.payload, next_page))
            }
            Response::Error(response) => Err(Error::ResponseStatusError {
                status: response.status,
                message: response.message,
            }),
            Response::Failure(err) => Err(err),
        }
    }
}

pub trait AsyncFrom<T>: Sized {
    async fn async_from(value: T) -> Self;
}

fn link_header(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

impl<T> AsyncFrom<reqwest::Response> for Response<Json, T>
where
    T: DeserializeOwned,
{
    async fn async_from(value: reqwest::Response) -> Self {
        let status = value.status().as_u16();
        let link = link_header(&value);

        let text = match value.text().await {
            Ok(text) => text,
            Err(cause) => return Response::Failure(Error::ReadResponseTextError { cause }),
        };

        if !(200..300).contains(&status) {
            return Response::Error(ErrorResponse {
                status,
                message: text,
            });
        }

        match serde_json::from_str::<T>(&text) {
            Ok(payload) => Response::Success(Inner {
                marker: PhantomData,
                payload,
                link,
            }),
            Err(cause) => Response::Failure(Error::ParseResponseError { cause }),
        }
    }
}

impl AsyncFrom<reqwest::Response> for Response<Empty, ()> {
    async fn async_from(value: reqwest::Response) -> Self {
        let status = value.status().as_u16();
        let link = link_header(&value);

        let text = match value.text().await {
            Ok(text) => text,
            Err(cause) => return Response::Failure(Error::ReadResponseTextError { cause }),
        };

        if !(200..300).contains(&status) {
            return Response::Error(ErrorResponse {
                status,
                message: text,
            });
        }

        Response::Success(Inner {
            marker: PhantomData,
            payload: (),
            link,
        })
    }
}
