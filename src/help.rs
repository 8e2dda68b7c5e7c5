/// Controls that have an explanation behind a help marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Frequency,
    Deposit,
    MonthlyRental,
    PlatformFee,
    YouReceive,
    DepositTotal,
}

impl HelpTopic {
    pub fn title(self) -> &'static str {
        match self {
            HelpTopic::Frequency => "Rental Frequency",
            HelpTopic::Deposit | HelpTopic::DepositTotal => "How Deposits Work",
            HelpTopic::MonthlyRental => "Monthly Rental",
            HelpTopic::PlatformFee => "Monthly Letly Fee",
            HelpTopic::YouReceive => "What You Get Monthly",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            HelpTopic::Frequency => {
                "Choose whether you want to charge rent per week or per month. \
                 This sets how the rental price is displayed and calculated."
            }
            HelpTopic::Deposit | HelpTopic::DepositTotal => {
                "Select how many weeks' worth of rent you'd like to charge as a deposit. \
                 This will be calculated using your selected rent."
            }
            HelpTopic::MonthlyRental => {
                "Your rent expressed per calendar month. Weekly rent is converted \
                 as 52 weeks spread over 12 months."
            }
            HelpTopic::PlatformFee => {
                "A monthly fee we deduct for managing rent, contracts, and support. \
                 Includes support, contracts, and rent handling."
            }
            HelpTopic::YouReceive => {
                "This is the amount you'll receive each month after Letly's service \
                 fee is deducted from your rental income."
            }
        }
    }
}
