//! Terminal feedback. The only place the client writes to stdout.

#![allow(clippy::print_stdout)]

use unichamada_checkin::{CheckInError, CheckInSession, LocationCheck};
use unichamada_primitives::{to_fixed, AttendanceReceipt, ValidationVerdict};

pub fn distance(meters: f64) {
    println!("{}m", to_fixed(meters, 2));
}

pub fn verdict(verdict: &ValidationVerdict) {
    println!("{}", verdict.message);
}

pub fn state(state: &LocationCheck, session: &CheckInSession) {
    if let Some(event) = session.event() {
        println!("{} (Evento #{})", event.name, event.id);
    }
    match state {
        LocationCheck::AwaitingEvent => println!("Carregando..."),
        LocationCheck::NoLocationRequired => {
            println!("Evento sem localização: validação dispensada")
        }
        LocationCheck::AwaitingPosition => println!("📍 Capturando sua localização..."),
        LocationCheck::PositionDenied(reason) => println!("Erro: {}", reason),
        LocationCheck::Validating => println!("Validando localização..."),
        LocationCheck::Valid { .. } | LocationCheck::Invalid { .. } => {
            if let Some(verdict) = session.verdict() {
                println!("{}", verdict.summary());
            }
        }
    }
}

pub fn receipt(receipt: &AttendanceReceipt) {
    println!(
        "✓ {} (#{}, matrícula {})",
        AttendanceReceipt::SUCCESS_MESSAGE,
        receipt.id,
        receipt.matricula
    );
}

pub fn failure(error: &CheckInError) {
    if error.is_user_correctable() {
        println!("✗ {}", error);
    } else {
        log::error!("Check-in failed: {}", error);
        println!("✗ Erro ao registrar presença: {}", error);
    }
}
