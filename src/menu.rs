// Console menus for customers and administrators.
// Reads commands line by line and renders results as plain text.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use tracing::debug;

use crate::api::{AdminResource, HotelResource};
use crate::config::date_format_or_default;
use crate::model::{Reservation, Room, RoomType};

const MAIN_MENU: &str = "\nWelcome to the Hotel Reservation Application\n\
--------------------------------------------\n\
1. Find and reserve a room\n\
2. See my reservations\n\
3. Create an Account\n\
4. Admin\n\
5. Exit\n\
--------------------------------------------\n\
Please select a number for the menu option:";

const ADMIN_MENU: &str = "Admin Menu\n\
1. Display all customers\n\
2. Display all rooms\n\
3. Display all reservations\n\
4. Add a room\n\
5. Find most popular room\n\
6. Back to main menu";

pub struct Console<R, W> {
    hotel: HotelResource,
    admin: AdminResource,
    date_format: String,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(
        hotel: HotelResource,
        admin: AdminResource,
        date_format: impl Into<String>,
        input: R,
        out: W,
    ) -> Self {
        let date_format: String = date_format.into();
        Self {
            hotel,
            admin,
            date_format: date_format_or_default(&date_format),
            input,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs the main menu until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "{MAIN_MENU}")?;

        loop {
            let Some(line) = self.read_line()? else {
                break;
            };

            match single_char(&line) {
                Some('1') => self.find_and_reserve_room()?,
                Some('2') => self.see_my_reservations()?,
                Some('3') => self.create_account()?,
                Some('4') => self.admin_menu()?,
                Some('5') => {
                    writeln!(self.out, "Exit")?;
                    break;
                }
                Some(_) => writeln!(self.out, "Unknown action\n")?,
                None => writeln!(self.out, "Error: Invalid action\n")?,
            }
        }

        Ok(())
    }

    // None on end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        writeln!(self.out, "{message}")?;
        self.read_line()
    }

    // A fixed date rendered in the console's date format, used in prompts
    fn date_example(&self, month: u32, day: u32) -> String {
        NaiveDate::from_ymd_opt(2020, month, day)
            .map(|date| date.format(&self.date_format).to_string())
            .unwrap_or_default()
    }

    fn read_date(&mut self, message: &str) -> io::Result<Option<NaiveDate>> {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };

            match NaiveDate::parse_from_str(line.trim(), &self.date_format) {
                Ok(date) => return Ok(Some(date)),
                Err(e) => {
                    debug!(input = %line, error = %e, "Unparseable date");
                    writeln!(self.out, "Error: Invalid date.")?;
                }
            }
        }
    }

    fn read_yes_no(&mut self, message: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };

            match line.trim().to_lowercase().as_str() {
                "y" => return Ok(Some(true)),
                "n" => return Ok(Some(false)),
                _ => writeln!(self.out, "Invalid input. Please enter 'y' or 'n'.")?,
            }
        }
    }

    fn find_and_reserve_room(&mut self) -> io::Result<()> {
        let check_in_prompt = format!("Enter Check-In Date example {}", self.date_example(2, 1));
        let Some(check_in) = self.read_date(&check_in_prompt)? else {
            return Ok(());
        };
        let check_out_prompt = format!("Enter Check-Out Date example {}", self.date_example(2, 21));
        let Some(check_out) = self.read_date(&check_out_prompt)? else {
            return Ok(());
        };

        if check_in >= check_out {
            writeln!(self.out, "Error: Check-In Date must be before Check-Out Date.")?;
            return self.print_main_menu();
        }

        let available = self.hotel.find_a_room(check_in, check_out);
        if !available.is_empty() {
            self.print_rooms(&available)?;
            return self.reserve_room(check_in, check_out, &available);
        }

        let alternatives = self.hotel.find_alternative_rooms(check_in, check_out);
        if alternatives.is_empty() {
            writeln!(self.out, "No rooms found.")?;
            return self.print_main_menu();
        }

        let alternative_check_in = self.hotel.add_default_plus_days(check_in);
        let alternative_check_out = self.hotel.add_default_plus_days(check_out);
        writeln!(
            self.out,
            "We've only found rooms on alternative dates:\nCheck-In Date: {}\nCheck-Out Date: {}",
            alternative_check_in.format(&self.date_format),
            alternative_check_out.format(&self.date_format)
        )?;
        self.print_rooms(&alternatives)?;
        self.reserve_room(alternative_check_in, alternative_check_out, &alternatives)
    }

    fn reserve_room(
        &mut self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        rooms: &[Room],
    ) -> io::Result<()> {
        match self.read_yes_no("Would you like to book? (y/n)")? {
            None => return Ok(()),
            Some(false) => writeln!(self.out, "Booking cancelled.")?,
            Some(true) => match self.read_yes_no("Do you have an account with us? (y/n)")? {
                None => return Ok(()),
                Some(false) => writeln!(self.out, "Please, create an account.")?,
                Some(true) => self.book_for_existing_customer(check_in, check_out, rooms)?,
            },
        }

        self.print_main_menu()
    }

    fn book_for_existing_customer(
        &mut self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        rooms: &[Room],
    ) -> io::Result<()> {
        let Some(email) = self.prompt("Enter Email format: name@domain.com")? else {
            return Ok(());
        };
        let email = email.trim();
        if self.hotel.get_customer(email).is_none() {
            return writeln!(
                self.out,
                "Customer not found. You may need to create a new account."
            );
        }

        let Some(room_number) = self.prompt("What room number would you like to reserve?")? else {
            return Ok(());
        };
        let room_number = room_number.trim();
        if !rooms.iter().any(|room| room.room_number == room_number) {
            return writeln!(
                self.out,
                "Error: room number not available. Start reservation again."
            );
        }

        let room = self.hotel.get_room(room_number);
        match self
            .hotel
            .book_a_room(email, room.as_ref(), check_in, check_out)
        {
            Ok(reservation) => {
                writeln!(self.out, "Reservation created successfully!")?;
                writeln!(self.out, "{reservation}")
            }
            Err(e) => writeln!(self.out, "Error: {e}"),
        }
    }

    fn see_my_reservations(&mut self) -> io::Result<()> {
        let Some(email) = self.prompt("Enter your Email format: name@domain.com")? else {
            return Ok(());
        };
        let email = email.trim().to_string();

        let reservations = self.hotel.get_customers_reservations(&email);
        if reservations.is_empty() {
            writeln!(self.out, "No reservations found.")?;
            return self.print_main_menu();
        }

        self.print_reservations(&reservations)?;

        loop {
            match self.prompt("Would you like to cancel a reservation? (y/n)")? {
                None => return Ok(()),
                Some(choice) if choice.trim() == "y" => self.cancel_reservation(&email)?,
                Some(choice) if choice.trim() == "n" => {
                    writeln!(self.out, "No cancellation performed.")?;
                    break;
                }
                Some(_) => writeln!(self.out, "Invalid input. Please enter 'y' or 'n'.")?,
            }
        }

        self.print_main_menu()
    }

    fn cancel_reservation(&mut self, email: &str) -> io::Result<()> {
        let Some(room_number) =
            self.prompt("Enter the ROOM NUMBER of the reservation you want to cancel:")?
        else {
            return Ok(());
        };
        let room_number = room_number.trim();

        let example = self.date_example(2, 1);
        writeln!(
            self.out,
            "Enter the CHECK-IN DATE (example {example}) of the reservation to cancel:"
        )?;
        let Some(line) = self.read_line()? else {
            return Ok(());
        };

        match NaiveDate::parse_from_str(line.trim(), &self.date_format) {
            Ok(check_in) => {
                if self.hotel.cancel_reservation(email, room_number, check_in) {
                    writeln!(
                        self.out,
                        "Reservation for room {room_number} cancelled successfully."
                    )
                } else {
                    writeln!(
                        self.out,
                        "Error: Reservation not found or unable to cancel. Check room number and date."
                    )
                }
            }
            Err(_) => writeln!(self.out, "Invalid date format. Returning to main menu."),
        }
    }

    fn create_account(&mut self) -> io::Result<()> {
        let Some(email) = self.prompt("Enter Email format: name@domain.com")? else {
            return Ok(());
        };
        let Some(first_name) = self.prompt("First Name:")? else {
            return Ok(());
        };
        let Some(last_name) = self.prompt("Last Name:")? else {
            return Ok(());
        };

        match self
            .hotel
            .create_a_customer(email.trim(), first_name.trim(), last_name.trim())
        {
            Ok(_) => {
                writeln!(self.out, "Account created successfully!")?;
                self.print_main_menu()
            }
            Err(e) => writeln!(self.out, "{e}"),
        }
    }

    fn admin_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "{ADMIN_MENU}")?;

        loop {
            let Some(line) = self.read_line()? else {
                writeln!(self.out, "No input received. Exiting admin menu...")?;
                return Ok(());
            };

            match single_char(&line) {
                Some('1') => self.display_all_customers()?,
                Some('2') => self.display_all_rooms()?,
                Some('3') => self.admin.display_all_reservations(&mut self.out)?,
                Some('4') => self.add_room()?,
                Some('5') => self.display_most_popular_room()?,
                Some('6') => return self.print_main_menu(),
                Some(_) => writeln!(self.out, "Unknown action\n")?,
                None => writeln!(self.out, "Error: Invalid action\n")?,
            }
        }
    }

    fn display_all_customers(&mut self) -> io::Result<()> {
        let customers = self.admin.get_all_customers();
        if customers.is_empty() {
            return writeln!(self.out, "No customers found.");
        }
        for customer in customers {
            writeln!(self.out, "{customer}")?;
        }
        Ok(())
    }

    fn display_all_rooms(&mut self) -> io::Result<()> {
        let rooms = self.admin.get_all_rooms();
        self.print_rooms(&rooms)
    }

    fn display_most_popular_room(&mut self) -> io::Result<()> {
        match self.admin.find_most_popular_room() {
            Some(room_number) => writeln!(self.out, "The most popular room is: {room_number}"),
            None => writeln!(
                self.out,
                "No reservations found to determine the most popular room."
            ),
        }
    }

    fn add_room(&mut self) -> io::Result<()> {
        loop {
            let Some(room_number) = self.prompt("Enter room number:")? else {
                return Ok(());
            };
            let Some(price) = self.read_room_price()? else {
                return Ok(());
            };
            let Some(room_type) = self.read_room_type()? else {
                return Ok(());
            };

            self.admin
                .add_room(vec![Room::new(room_number.trim(), price, room_type)]);
            writeln!(self.out, "Room added successfully!")?;

            match self.read_add_another()? {
                Some(true) => continue,
                Some(false) => return writeln!(self.out, "{ADMIN_MENU}"),
                None => {
                    writeln!(self.out, "No input received. Returning to menu.")?;
                    return writeln!(self.out, "{ADMIN_MENU}");
                }
            }
        }
    }

    fn read_room_price(&mut self) -> io::Result<Option<f64>> {
        writeln!(self.out, "Enter price per night:")?;
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match line.trim().parse::<f64>() {
                Ok(price) if price.is_finite() && price >= 0.0 => return Ok(Some(price)),
                _ => writeln!(
                    self.out,
                    "Invalid room price! Please, enter a valid double number. \
                     Decimals should be separated by point (.)"
                )?,
            }
        }
    }

    fn read_room_type(&mut self) -> io::Result<Option<RoomType>> {
        writeln!(
            self.out,
            "Enter room type: {} for single bed, {} for double bed:",
            RoomType::Single.label(),
            RoomType::Double.label()
        )?;
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match RoomType::from_label(&line) {
                Some(room_type) => return Ok(Some(room_type)),
                None => writeln!(
                    self.out,
                    "Invalid room type! Please, choose {} for single bed or {} for double bed:",
                    RoomType::Single.label(),
                    RoomType::Double.label()
                )?,
            }
        }
    }

    fn read_add_another(&mut self) -> io::Result<Option<bool>> {
        writeln!(self.out, "Would like to add another room? Y/N")?;
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match line.as_str() {
                "Y" => return Ok(Some(true)),
                "N" => return Ok(Some(false)),
                _ => writeln!(self.out, "Please enter Y (Yes) or N (No)")?,
            }
        }
    }

    fn print_rooms(&mut self, rooms: &[Room]) -> io::Result<()> {
        if rooms.is_empty() {
            return writeln!(self.out, "No rooms found.");
        }
        for room in rooms {
            writeln!(self.out, "{room}")?;
        }
        Ok(())
    }

    fn print_reservations(&mut self, reservations: &[Reservation]) -> io::Result<()> {
        for reservation in reservations {
            writeln!(self.out, "\n{reservation}")?;
        }
        Ok(())
    }

    fn print_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "{MAIN_MENU}")
    }
}

// The command character when the line is exactly one character long
fn single_char(line: &str) -> Option<char> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DATE_FORMAT;
    use crate::customer_service::CustomerDirectory;
    use crate::reservation_service::ReservationStore;
    use std::io::Cursor;
    use std::sync::Arc;

    struct Fixture {
        store: Arc<ReservationStore>,
        customers: Arc<CustomerDirectory>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: Arc::new(ReservationStore::new()),
                customers: Arc::new(CustomerDirectory::new()),
            }
        }

        fn run(&self, input: &str) -> String {
            self.run_with_format(DEFAULT_DATE_FORMAT, input)
        }

        fn run_with_format(&self, date_format: &str, input: &str) -> String {
            let hotel = HotelResource::new(self.store.clone(), self.customers.clone());
            let admin = AdminResource::new(self.store.clone(), self.customers.clone());
            let mut console = Console::new(
                hotel,
                admin,
                date_format,
                Cursor::new(input.to_string()),
                Vec::new(),
            );
            console.run().unwrap();
            String::from_utf8(console.into_output()).unwrap()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invalid_actions() {
        let fixture = Fixture::new();
        let output = fixture.run("12\n9\n\n5\n");

        assert!(output.contains("Error: Invalid action"));
        assert!(output.contains("Unknown action"));
        assert!(output.ends_with("Exit\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let fixture = Fixture::new();
        let output = fixture.run("3\nsomeone@example.com\n");

        assert!(output.contains("First Name:"));
        assert!(!output.contains("Account created"));
    }

    #[test]
    fn test_create_account() {
        let fixture = Fixture::new();
        let output = fixture.run("3\nnada@example.com\nNada\nAlsulami\n3\nbad-email\nA\nB\n5\n");

        assert!(output.contains("Account created successfully!"));
        assert!(output.contains("Invalid email: bad-email"));
        assert!(fixture.customers.get_customer("nada@example.com").is_some());
        assert_eq!(fixture.customers.get_all_customers().len(), 1);
    }

    #[test]
    fn test_find_and_reserve_room() {
        let fixture = Fixture::new();
        fixture.store.add_room(Room::new("101", 150.0, RoomType::Single));
        fixture
            .customers
            .add_customer("guest@example.com", "Guest", "One")
            .unwrap();

        let output = fixture.run(
            "1\nnot-a-date\n03/01/2025\n03/05/2025\ny\ny\nguest@example.com\n101\n5\n",
        );

        assert!(output.contains("Error: Invalid date."));
        assert!(output.contains("Room Number: 101 Single bed Room Price: $150.00"));
        assert!(output.contains("Reservation created successfully!"));

        let customer = fixture.customers.get_customer("guest@example.com").unwrap();
        let reservations = fixture.store.get_customers_reservation(&customer);
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].check_in, date(2025, 3, 1));
    }

    #[test]
    fn test_reserve_offers_alternative_dates() {
        let fixture = Fixture::new();
        fixture.store.add_room(Room::new("101", 150.0, RoomType::Single));
        let customer = fixture
            .customers
            .add_customer("guest@example.com", "Guest", "One")
            .unwrap();
        let room = fixture.store.get_room("101").unwrap();
        fixture
            .store
            .reserve_a_room(Some(&customer), Some(&room), Some(date(2025, 2, 1)), Some(date(2025, 2, 3)))
            .unwrap();

        let output = fixture.run("1\n02/01/2025\n02/03/2025\ny\ny\nguest@example.com\n101\n5\n");

        assert!(output.contains("We've only found rooms on alternative dates:"));
        assert!(output.contains("Check-In Date: 02/08/2025"));
        assert!(output.contains("Check-Out Date: 02/10/2025"));

        let history = fixture.store.get_customer_reservation_history(Some(&customer));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].check_in, date(2025, 2, 8));
    }

    #[test]
    fn test_reserve_rejects_unknown_customer_and_unlisted_room() {
        let fixture = Fixture::new();
        fixture.store.add_room(Room::new("101", 150.0, RoomType::Single));
        fixture
            .customers
            .add_customer("guest@example.com", "Guest", "One")
            .unwrap();

        let output = fixture.run(
            "1\n03/01/2025\n03/05/2025\ny\ny\nnobody@example.com\n\
             1\n03/01/2025\n03/05/2025\ny\ny\nguest@example.com\n999\n\
             1\n03/01/2025\n03/05/2025\nmaybe\nn\n5\n",
        );

        assert!(output.contains("Customer not found. You may need to create a new account."));
        assert!(output.contains("Error: room number not available. Start reservation again."));
        assert!(output.contains("Invalid input. Please enter 'y' or 'n'."));
        assert!(output.contains("Booking cancelled."));
        assert!(fixture.store.all_reservations().is_empty());
    }

    #[test]
    fn test_no_rooms_anywhere() {
        let fixture = Fixture::new();
        let output = fixture.run("1\n03/01/2025\n03/05/2025\n5\n");
        assert!(output.contains("No rooms found."));
    }

    #[test]
    fn test_see_and_cancel_reservation() {
        let fixture = Fixture::new();
        fixture.store.add_room(Room::new("C1", 100.0, RoomType::Single));
        let customer = fixture
            .customers
            .add_customer("guest@example.com", "Guest", "One")
            .unwrap();
        let room = fixture.store.get_room("C1").unwrap();
        fixture
            .store
            .reserve_a_room(Some(&customer), Some(&room), Some(date(2025, 1, 1)), Some(date(2025, 1, 4)))
            .unwrap();

        let output = fixture.run(
            "2\nguest@example.com\ny\nC1\n01/02/2025\ny\nC1\n01/01/2025\nn\n2\nguest@example.com\n5\n",
        );

        assert!(output.contains("Room Number: C1"));
        assert!(output.contains("Error: Reservation not found or unable to cancel."));
        assert!(output.contains("Reservation for room C1 cancelled successfully."));
        assert!(output.contains("No cancellation performed."));
        assert!(output.contains("No reservations found."));
        assert!(fixture.store.get_customers_reservation(&customer).is_empty());
    }

    #[test]
    fn test_admin_add_room_and_listings() {
        let fixture = Fixture::new();
        let output = fixture.run(
            "4\n2\n5\n4\n101\nabc\n-5\n150.5\n3\n1\nmaybe\nY\n102\n0\n2\nN\n2\n1\n3\n6\n5\n",
        );

        assert!(output.contains("No rooms found."));
        assert!(output.contains("No reservations found to determine the most popular room."));
        assert!(output.contains("Invalid room price!"));
        assert!(output.contains("Invalid room type!"));
        assert!(output.contains("Please enter Y (Yes) or N (No)"));
        assert!(output.contains("Room Number: 101 Single bed Room Price: $150.50"));
        assert!(output.contains("Room Number: 102 Double bed Room Price: Free"));
        assert!(output.contains("No customers found."));
        assert!(output.contains("No reservations found."));
        assert!(output.ends_with("Exit\n"));
        assert_eq!(fixture.store.get_all_rooms().len(), 2);
    }

    #[test]
    fn test_admin_most_popular_room() {
        let fixture = Fixture::new();
        fixture.store.add_room(Room::new("201", 100.0, RoomType::Double));
        let customer = fixture
            .customers
            .add_customer("guest@example.com", "Guest", "One")
            .unwrap();
        let room = fixture.store.get_room("201").unwrap();
        fixture
            .store
            .reserve_a_room(Some(&customer), Some(&room), Some(date(2025, 1, 1)), Some(date(2025, 1, 4)))
            .unwrap();

        let output = fixture.run("4\n5\n1\n6\n5\n");
        assert!(output.contains("The most popular room is: 201"));
        assert!(output.contains("First Name: Guest Last Name: One Email: guest@example.com"));
    }

    #[test]
    fn test_custom_date_format_used_for_prompts_and_input() {
        let fixture = Fixture::new();
        fixture.store.add_room(Room::new("101", 150.0, RoomType::Single));

        let output = fixture.run_with_format("%Y-%m-%d", "1\n2025-03-01\n2025-03-05\nn\n5\n");

        assert!(output.contains("Enter Check-In Date example 2020-02-01"));
        assert!(output.contains("Enter Check-Out Date example 2020-02-21"));
        assert!(!output.contains("Error: Invalid date."));
        assert!(output.contains("Room Number: 101 Single bed Room Price: $150.00"));
    }

    #[test]
    fn test_unusable_date_format_falls_back_to_default() {
        let fixture = Fixture::new();
        fixture.store.add_room(Room::new("101", 150.0, RoomType::Single));

        let output = fixture.run_with_format("%Q-nonsense", "1\n03/01/2025\n03/05/2025\nn\n5\n");

        assert!(output.contains("Enter Check-In Date example 02/01/2020"));
        assert!(!output.contains("Error: Invalid date."));
        assert!(output.contains("Room Number: 101 Single bed Room Price: $150.00"));
        assert!(output.contains("Booking cancelled."));
    }

    #[test]
    fn test_typed_email_and_room_number_are_trimmed() {
        let fixture = Fixture::new();
        fixture.store.add_room(Room::new("101", 150.0, RoomType::Single));
        let output = fixture.run(
            "3\n guest@example.com \nGuest\nOne\n\
             1\n03/01/2025\n03/05/2025\ny\ny\n  guest@example.com \n 101 \n\
             2\n\tguest@example.com\nn\n5\n",
        );

        assert!(output.contains("Account created successfully!"));
        assert!(!output.contains("Customer not found."));
        assert!(output.contains("Reservation created successfully!"));
        assert!(!output.contains("No reservations found."));
        assert!(output.contains("No cancellation performed."));

        let customer = fixture.customers.get_customer("guest@example.com").unwrap();
        assert_eq!(fixture.store.get_customers_reservation(&customer).len(), 1);
    }

    #[test]
    fn test_single_char() {
        assert_eq!(single_char("1"), Some('1'));
        assert_eq!(single_char(""), None);
        assert_eq!(single_char("12"), None);
    }
}
