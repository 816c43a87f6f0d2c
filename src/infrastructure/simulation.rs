use crate::domain::method::PaymentMethod;
use crate::error::{PaymentError, Result};
use std::time::Duration;
use tokio::sync::watch;

/// How simulated backend steps spend their time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    /// Sleep for the step's nominal duration.
    Simulated,
    /// Complete every step immediately.
    Skip,
}

/// Runs the timed sub-steps of a simulated backend call.
///
/// A simulator may be interrupted through its [`InterruptHandle`]; any step
/// running or started after that fails with `ProcessingInterrupted`.
#[derive(Debug, Clone)]
pub struct Simulator {
    latency: Latency,
    interrupted: watch::Receiver<bool>,
}

/// Interrupts every simulator cloned from the one it was created with.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    sender: watch::Sender<bool>,
}

impl InterruptHandle {
    pub fn interrupt(&self) {
        self.sender.send_replace(true);
    }
}

impl Simulator {
    pub fn new(latency: Latency) -> (Self, InterruptHandle) {
        let (sender, interrupted) = watch::channel(false);
        (
            Self {
                latency,
                interrupted,
            },
            InterruptHandle { sender },
        )
    }

    /// A simulator that skips delays. Handy for tests and dry runs.
    pub fn instant() -> Self {
        Self::new(Latency::Skip).0
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    pub async fn step(
        &self,
        method: PaymentMethod,
        step: &'static str,
        nominal: Duration,
    ) -> Result<()> {
        tracing::info!(method = %method, step, delay_ms = nominal.as_millis() as u64, "payment step");

        if *self.interrupted.borrow() {
            return Err(PaymentError::ProcessingInterrupted { method, step });
        }

        match self.latency {
            Latency::Skip => Ok(()),
            Latency::Simulated => {
                tokio::select! {
                    _ = tokio::time::sleep(nominal) => Ok(()),
                    _ = wait_for_interrupt(self.interrupted.clone()) => {
                        Err(PaymentError::ProcessingInterrupted { method, step })
                    }
                }
            }
        }
    }
}

/// Resolves once the flag is raised. Never resolves if the handle is dropped
/// without interrupting.
async fn wait_for_interrupt(mut interrupted: watch::Receiver<bool>) {
    loop {
        if *interrupted.borrow_and_update() {
            return;
        }
        if interrupted.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_skip_latency_completes_immediately() {
        let simulator = Simulator::instant();
        let started = std::time::Instant::now();
        simulator
            .step(PaymentMethod::Stripe, "connect", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_interrupted_before_step() {
        let (simulator, handle) = Simulator::new(Latency::Skip);
        handle.interrupt();
        let result = simulator
            .step(PaymentMethod::PayPal, "authorize", Duration::from_millis(1))
            .await;
        assert!(matches!(
            result,
            Err(PaymentError::ProcessingInterrupted {
                method: PaymentMethod::PayPal,
                step: "authorize"
            })
        ));
    }

    #[tokio::test]
    async fn test_interrupted_during_sleep() {
        let (simulator, handle) = Simulator::new(Latency::Simulated);
        let task = tokio::spawn(async move {
            simulator
                .step(PaymentMethod::CreditCard, "connect", Duration::from_secs(60))
                .await
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.interrupt();

        let result = task.await.unwrap();
        assert!(matches!(
            result,
            Err(PaymentError::ProcessingInterrupted { step: "connect", .. })
        ));
    }
}
