use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct IncomeRow {
    pub id: String,
    pub kind: String,
    pub counterparty: String,
    pub amount: String,
    pub occurred_on: String,
    pub expected_on: String,
    pub received_on: Option<String>,
    pub status: String,
    pub effective_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub series: SeriesRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseRow {
    pub id: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub due_on: String,
    pub status: String,
    pub paid_on: Option<String>,
    pub series: SeriesRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesRow {
    pub is_recurring: bool,
    pub frequency: Option<String>,
    pub series_end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeAddData {
    pub kind: String,
    pub created: i64,
    pub total_amount: String,
    pub rows: Vec<IncomeRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeListSummary {
    pub count: i64,
    pub pending_count: i64,
    pub overdue_count: i64,
    pub open_amount: String,
    pub received_amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeListData {
    pub kind: String,
    pub today: String,
    pub month: Option<String>,
    pub status_filter: Option<String>,
    pub search: Option<String>,
    pub summary: IncomeListSummary,
    pub rows: Vec<IncomeRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeEntryData {
    pub action: String,
    pub entry: IncomeRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseAddData {
    pub created: i64,
    pub total_amount: String,
    pub rows: Vec<ExpenseRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseListSummary {
    pub count: i64,
    pub paid_amount: String,
    pub unpaid_amount: String,
    pub total_amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseListData {
    pub month: Option<String>,
    pub category_filter: Option<String>,
    pub search: Option<String>,
    pub summary: ExpenseListSummary,
    pub rows: Vec<ExpenseRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseEntryData {
    pub action: String,
    pub entry: ExpenseRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteData {
    pub entry_id: String,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryRow {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub entry_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryListData {
    pub kind: String,
    pub rows: Vec<RegistryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryItemData {
    pub action: String,
    pub item: RegistryRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileData {
    pub full_name: String,
    pub specialty: String,
    pub crm: String,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementLineRow {
    pub source_id: String,
    pub date: String,
    pub label: String,
    pub category: String,
    pub direction: String,
    pub amount: String,
    pub signed_amount: String,
    pub running_balance: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementData {
    pub month: String,
    pub as_of: String,
    pub opening_balance: String,
    pub total_credits: String,
    pub total_debits: String,
    pub closing_balance: String,
    pub lines: Vec<StatementLineRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportData {
    pub path: String,
    pub format: String,
    pub month: String,
    pub as_of: String,
    pub lines_written: i64,
    pub closing_balance: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthSummaryRow {
    pub month: String,
    pub to_receive: String,
    pub received: String,
    pub expenses: String,
    pub balance: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CashFlowRow {
    pub month: String,
    pub received: String,
    pub projected: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverdueAlertRow {
    pub entry_id: String,
    pub kind: String,
    pub counterparty: String,
    pub amount: String,
    pub expected_on: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CounterpartyRow {
    pub counterparty: String,
    pub total: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashData {
    pub today: String,
    pub summary: MonthSummaryRow,
    pub cash_flow: Vec<CashFlowRow>,
    pub overdue_alerts: Vec<OverdueAlertRow>,
    pub pending_by_hospital: Vec<CounterpartyRow>,
    pub overdue_ranking: Vec<CounterpartyRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CapabilitiesRow {
    pub is_pro: bool,
    pub is_trialing: bool,
    pub days_remaining: i64,
    pub may_write: bool,
    pub may_export: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanData {
    pub today: String,
    pub status: String,
    pub is_admin: bool,
    pub trial_end: Option<String>,
    pub current_period_end: Option<String>,
    pub capabilities: CapabilitiesRow,
}
