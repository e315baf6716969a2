// This file is @generated by gapic. Do not edit.
// This snippet has been automatically generated and should be regarded as a code template only.
// It will require modifications to work:
// - It may require correct/in-range values for request initialization.
// - It may require specifying an endpoint when creating the client.

// [START library_v1_generated_library_service_client_merge_shelves_by_name_and_other_shelf]
use std::error::Error;

use example_library_v1::LibraryServiceClient;
use example_library_v1::resources::ShelfName;

pub fn sample_merge_shelves_by_name_and_other_shelf(
    client: &LibraryServiceClient,
) -> Result<(), Box<dyn Error>> {
    let name = ShelfName::of("[SHELF]");
    let other_shelf = ShelfName::of("[SHELF]");
    let response = client.merge_shelves_by_name_and_other_shelf(&name, &other_shelf)?;
    println!("{response:?}");
    Ok(())
}
// [END library_v1_generated_library_service_client_merge_shelves_by_name_and_other_shelf]
