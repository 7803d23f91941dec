#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    StartDetection,
    StopCamera,
    Reset,
    ProcessPayment,
    PriceInputChanged(String),
    CashInputChanged(String),
    AddPrice,
    AddCash,
    DialogClosed,
    Exit,
}
