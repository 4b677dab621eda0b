//! REST client for the Airtable records API.
//!
//! One async method per remote operation. Every call is an independent
//! round trip; nothing is cached and nothing is retried (a failure surfaces
//! to the operator as a short message and they try again).

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use nailcal_core::{Booking, Client, NewBooking, NewClient, Procedure, SalonError, SalonResult};

use crate::config::AirtableConfig;
use crate::convert::{
    booking_from_record, booking_to_fields, client_from_record, client_to_fields,
    procedure_from_record,
};
use crate::records::{BookingFields, ClientFields, ListResponse, ProcedureFields, Record};

const API_BASE: &str = "https://api.airtable.com/v0";

#[derive(Debug, Clone)]
pub struct AirtableClient {
    http: reqwest::Client,
    config: AirtableConfig,
}

impl AirtableClient {
    pub fn new(config: AirtableConfig) -> Self {
        AirtableClient {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Bookings whose start falls inside `[from, to)`, earliest first.
    /// Records without a parseable date are dropped here.
    pub async fn list_bookings(
        &self,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> SalonResult<Vec<Booking>> {
        let formula = window.map(|(from, to)| {
            format!(
                "AND(NOT(IS_BEFORE({{Date}}, '{}')), IS_BEFORE({{Date}}, '{}'))",
                from.to_rfc3339_opts(SecondsFormat::Secs, true),
                to.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
        });

        let records: Vec<Record<BookingFields>> = self
            .list_all(&self.config.bookings_table, formula.as_deref())
            .await?;

        let mut bookings: Vec<Booking> = records
            .into_iter()
            .filter_map(booking_from_record)
            .collect();
        bookings.sort_by_key(|b| b.start);
        Ok(bookings)
    }

    pub async fn get_booking(&self, id: &str) -> SalonResult<Booking> {
        let url = format!("{}/{}", self.table_url(&self.config.bookings_table), id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(transport_error)?;
        let response = self.check_status(response, "booking").await?;

        let record: Record<BookingFields> = response.json().await.map_err(body_error)?;
        booking_from_record(record)
            .ok_or_else(|| SalonError::NotFound(format!("Booking {} has no date", id)))
    }

    pub async fn create_booking(&self, new: &NewBooking) -> SalonResult<Booking> {
        let response = self
            .http
            .post(self.table_url(&self.config.bookings_table))
            .bearer_auth(&self.config.api_key)
            .json(&booking_to_fields(new))
            .send()
            .await
            .map_err(transport_error)?;
        let response = self.check_status(response, "booking").await?;

        let record: Record<BookingFields> = response.json().await.map_err(body_error)?;
        booking_from_record(record)
            .ok_or_else(|| SalonError::Store("Created booking came back without a date".into()))
    }

    pub async fn update_booking(&self, id: &str, new: &NewBooking) -> SalonResult<Booking> {
        let url = format!("{}/{}", self.table_url(&self.config.bookings_table), id);
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.config.api_key)
            .json(&booking_to_fields(new))
            .send()
            .await
            .map_err(transport_error)?;
        let response = self.check_status(response, "booking").await?;

        let record: Record<BookingFields> = response.json().await.map_err(body_error)?;
        booking_from_record(record)
            .ok_or_else(|| SalonError::Store("Updated booking came back without a date".into()))
    }

    pub async fn delete_booking(&self, id: &str) -> SalonResult<()> {
        let url = format!("{}/{}", self.table_url(&self.config.bookings_table), id);
        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(transport_error)?;
        self.check_status(response, "booking").await?;
        Ok(())
    }

    pub async fn list_clients(&self) -> SalonResult<Vec<Client>> {
        let records: Vec<Record<ClientFields>> =
            self.list_all(&self.config.clients_table, None).await?;
        Ok(records.into_iter().map(client_from_record).collect())
    }

    pub async fn create_client(&self, new: &NewClient) -> SalonResult<Client> {
        let response = self
            .http
            .post(self.table_url(&self.config.clients_table))
            .bearer_auth(&self.config.api_key)
            .json(&client_to_fields(new))
            .send()
            .await
            .map_err(transport_error)?;
        let response = self.check_status(response, "client").await?;

        let record: Record<ClientFields> = response.json().await.map_err(body_error)?;
        Ok(client_from_record(record))
    }

    pub async fn list_procedures(&self, active_only: bool) -> SalonResult<Vec<Procedure>> {
        let formula = active_only.then(|| "{Active} = 1".to_string());
        let records: Vec<Record<ProcedureFields>> = self
            .list_all(&self.config.procedures_table, formula.as_deref())
            .await?;
        Ok(records.into_iter().map(procedure_from_record).collect())
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", API_BASE, self.config.base_id, table)
    }

    /// Fetch every page of a list call, following the offset token until the
    /// store stops returning one.
    async fn list_all<F: DeserializeOwned>(
        &self,
        table: &str,
        filter_by_formula: Option<&str>,
    ) -> SalonResult<Vec<Record<F>>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(self.table_url(table))
                .bearer_auth(&self.config.api_key);
            if let Some(formula) = filter_by_formula {
                request = request.query(&[("filterByFormula", formula)]);
            }
            if let Some(token) = &offset {
                request = request.query(&[("offset", token.as_str())]);
            }

            let response = request.send().await.map_err(transport_error)?;
            let response = self.check_status(response, table).await?;
            let page: ListResponse<F> = response.json().await.map_err(body_error)?;

            records.extend(page.records);

            match page.offset {
                Some(token) => {
                    tracing::debug!(table, "following list pagination offset");
                    offset = Some(token);
                }
                None => break,
            }
        }

        Ok(records)
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
        what: &str,
    ) -> SalonResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%status, what, body = %body, "store request failed");

        if status == StatusCode::NOT_FOUND {
            return Err(SalonError::NotFound(format!(
                "The requested {} does not exist",
                what
            )));
        }
        Err(SalonError::Store(format!(
            "The booking database rejected the {} request ({})",
            what, status
        )))
    }
}

fn transport_error(err: reqwest::Error) -> SalonError {
    SalonError::Store(format!("Could not reach the booking database: {}", err))
}

fn body_error(err: reqwest::Error) -> SalonError {
    SalonError::Store(format!("Unexpected response from the booking database: {}", err))
}
