#[derive(Debug, Clone)]
pub enum Message {
    // === ENTRY MESSAGES ===
    EntryCreated(i64),
    EntryUpdated(i64),
    EntryDeleted(i64),
    EntryNotFound(i64),
    EntryCreateFailed,
    EntryUpdateFailed,
    EntryFinished(String), // end time
    NoOngoingEntry,
    NoEntriesFound(String), // range
    EntryListHeader(String), // range
    ConfirmDeleteEntry(i64),
    EditingEntry(i64),
    EntryInProgressNote,

    // === TEMPLATE MESSAGES ===
    TemplateCreated(String),
    TemplateUpdated(String),
    TemplateDeleted(String),
    TemplateNotFound(String),
    TemplateAlreadyExists(String),
    TemplateCreateFailed,
    NoTemplatesFound,
    NoTemplatesMatchingQuery(String),
    TemplateListHeader,
    TemplateSearchResults(String),
    SelectTemplateToEdit,
    SelectTemplateToDelete,
    SelectTemplateAction,
    EditingTemplate(String),
    ConfirmDeleteTemplate(String),

    // === REPORT MESSAGES ===
    ReportHeader(String),     // range
    NoReportData(String),     // range
    MixedCurrencies(String),  // code list
    EarningsForMonth(String), // month/year
    TotalHours(String),
    TotalEarnings(String),
    AverageRate(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleProfile,
    ConfigModuleDefaults,

    // === EXPORT MESSAGES ===
    ExportingData(String, String), // data type, format
    ExportCompleted(String),       // path

    // === PROMPTS ===
    PromptSelectModules,
    PromptUserName,
    PromptDefaultRate,
    PromptDefaultCurrency,
    PromptDefaultBreak,
    PromptEntryDate,
    PromptStartTime,
    PromptEndTime,
    PromptBreakMinutes,
    PromptHourlyRate,
    PromptSelectCurrency,
    PromptTemplateName,

    // === VALIDATION ===
    InvalidClockTime,
    BreakMinutesNegative,
    RateNegative,

    // === GENERIC ===
    OperationCancelled,
}
