/*
    Groundtrack, day-long ground track extraction
    Copyright (C) 2026 The groundtrack developers

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use groundtrack::region::LatLon;
use groundtrack::time_grid::CalendarDate;

/// Number of vertices asked for when the region is entered interactively.
pub const NUM_VERTICES: usize = 4;

/// Asks for the UTC day until a valid YYYY-MM-DD date is entered.
pub fn date(theme: &ColorfulTheme) -> Result<CalendarDate, dialoguer::Error> {
    Input::<CalendarDate>::with_theme(theme)
        .with_prompt("Enter a date in YYYY-MM-DD format")
        .interact_text()
}

/// Asks for the vertices of the region, one latitude longitude pair at a time.
pub fn region(theme: &ColorfulTheme) -> Result<Vec<LatLon>, dialoguer::Error> {
    let mut vertices = Vec::with_capacity(NUM_VERTICES);
    for i in 1..=NUM_VERTICES {
        let vertex = Input::<LatLon>::with_theme(theme)
            .with_prompt(format!(
                "Enter latitude longitude pair {i} (e.g., 1.1 2.2)"
            ))
            .validate_with(|pair: &LatLon| -> Result<(), String> {
                if pair.is_valid() {
                    Ok(())
                } else {
                    Err(format!(
                        "{pair} is out of range, latitude must be within [-90, 90] and longitude within [-180, 180]"
                    ))
                }
            })
            .interact_text()?;
        vertices.push(vertex);
    }
    Ok(vertices)
}
