// src/services/payroll_service.rs

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::HrRepository,
    models::hr::{PayrollEntry, PayrollSummary},
};

/// Salário proporcional aos dias de ponto registrados: sem registro no
/// mês, vale o salário cheio (não penalizamos quem não bate ponto).
pub fn prorated_pay(base_salary: Decimal, days_present: i64, days_recorded: i64) -> Decimal {
    if days_recorded == 0 {
        return base_salary;
    }

    (base_salary * Decimal::from(days_present) / Decimal::from(days_recorded)).round_dp(2)
}

#[derive(Clone)]
pub struct PayrollService {
    repo: HrRepository,
}

impl PayrollService {
    pub fn new(repo: HrRepository) -> Self {
        Self { repo }
    }

    /// Folha do mês: agregação pura (soma/agrupamento) sobre funcionários
    /// ativos e as marcações de ponto daquele mês.
    pub async fn monthly_summary(
        &self,
        reference_month: NaiveDate,
    ) -> Result<PayrollSummary, AppError> {
        // Normaliza para o dia 1 e fecha o intervalo [início, próximo mês)
        let month_start = reference_month
            .with_day(1)
            .ok_or_else(|| anyhow::anyhow!("data de referência inválida"))?;
        let month_end = month_start
            .checked_add_months(Months::new(1))
            .ok_or_else(|| anyhow::anyhow!("mês de referência fora do intervalo"))?;

        let employees = self.repo.list_active_employees().await?;
        let attendance = self.repo.list_attendance_in_range(month_start, month_end).await?;

        // employee_id -> (presentes, ausentes)
        let mut counts: HashMap<Uuid, (i64, i64)> = HashMap::new();
        for entry in &attendance {
            let slot = counts.entry(entry.employee_id).or_insert((0, 0));
            if entry.present {
                slot.0 += 1;
            } else {
                slot.1 += 1;
            }
        }

        let mut entries = Vec::with_capacity(employees.len());
        let mut total_net = Decimal::ZERO;

        for employee in employees {
            let (days_present, days_absent) =
                counts.get(&employee.id).copied().unwrap_or((0, 0));

            let net_pay = prorated_pay(
                employee.base_salary,
                days_present,
                days_present + days_absent,
            );
            total_net += net_pay;

            entries.push(PayrollEntry {
                employee_id: employee.id,
                full_name: employee.full_name,
                base_salary: employee.base_salary,
                days_present,
                days_absent,
                net_pay,
            });
        }

        Ok(PayrollSummary {
            reference_month: month_start,
            entries,
            total_net,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_presence_pays_full_salary() {
        let pay = prorated_pay(Decimal::from(2500), 22, 22);
        assert_eq!(pay, Decimal::from(2500));
    }

    #[test]
    fn no_recorded_days_pays_full_salary() {
        let pay = prorated_pay(Decimal::from(2500), 0, 0);
        assert_eq!(pay, Decimal::from(2500));
    }

    #[test]
    fn absences_prorate_the_salary() {
        // 2200 * 10/20 = 1100
        let pay = prorated_pay(Decimal::from(2200), 10, 20);
        assert_eq!(pay, Decimal::from(1100));
    }

    #[test]
    fn proration_rounds_to_cents() {
        // 1000 * 1/3 = 333.33...
        let pay = prorated_pay(Decimal::from(1000), 1, 3);
        assert_eq!(pay.to_string(), "333.33");
    }
}
