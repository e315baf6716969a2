// This file is @generated by gapic. Do not edit.
// This snippet has been automatically generated and should be regarded as a code template only.
// It will require modifications to work:
// - It may require correct/in-range values for request initialization.
// - It may require specifying an endpoint when creating the client.

// [START localhost_v1beta1_generated_echo_client_chat]
use std::error::Error;

use google_showcase_v1beta1::EchoClient;
use google_showcase_v1beta1::model::EchoRequest;

pub fn sample_chat(client: &EchoClient) -> Result<(), Box<dyn Error>> {
    let requests = vec![EchoRequest::default()];
    for response in client.chat(Box::new(requests.into_iter()))? {
        let response = response?;
        println!("{response:?}");
    }
    Ok(())
}
// [END localhost_v1beta1_generated_echo_client_chat]
