//! Payment commands

use super::client_from_env;
use crate::output::{or_dash, print_json, Format, Status};
use anyhow::Result;
use paycrypt_api_client::endpoints::payments::{CreatePaymentRequest, Payment};

/// Create a payment
pub async fn create(request: &CreatePaymentRequest, format: Format) -> Result<bool> {
    request.validate()?;
    let client = client_from_env()?;
    let payment = client.payments().create(request).await?;

    if format == Format::Json {
        print_json(&payment)?;
    } else {
        Status::success(&format!("Payment {} created", payment.payment_id));
        print_payment(&payment);
    }
    Ok(true)
}

/// Show payment status
pub async fn get(payment_id: &str, format: Format) -> Result<bool> {
    let client = client_from_env()?;
    let payment = client.payments().get(payment_id).await?;

    if format == Format::Json {
        print_json(&payment)?;
    } else {
        Status::header(&format!("Payment {}", payment.payment_id));
        print_payment(&payment);
    }
    Ok(true)
}

fn print_payment(payment: &Payment) {
    let amount = payment
        .crypto_amount
        .as_ref()
        .map(ToString::to_string);

    Status::field("Status", or_dash(payment.status.as_deref()));
    Status::field("Address", or_dash(payment.address.as_deref()));
    Status::field(
        "Amount",
        &format!(
            "{} {}",
            or_dash(amount.as_deref()),
            or_dash(payment.crypto_currency.as_deref())
        ),
    );
    if let Some(ref qr) = payment.qr_code {
        Status::field("QR code", qr);
    }
}
